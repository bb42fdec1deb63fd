//! Replies carrying local media attachments.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::Arc;
use tracing::debug;

use crate::bot::picker::{Picker, pick};
use crate::command::{
    domain::{Attachment, CommandResponse, Embed, Invocation},
    ports::{CommandHandler, HandlerError, HandlerResult},
};
use crate::config::SpecEntry;

const MIGHTCON_ALBUM_URL: &str = "https://imgur.com/a/iJ3axyF";
const MIGHTCON_COLOR: u32 = 0x0000_00ff;

/// Suggests a random class specialization.
///
/// A class is chosen first and then one of its specializations, so classes
/// with many specializations are not favoured.
#[derive(Clone)]
pub struct PickHandler {
    classes: Vec<Vec<SpecEntry>>,
    icon_dir: Utf8PathBuf,
    picker: Arc<dyn Picker>,
}

impl PickHandler {
    /// Creates a handler over the configured specializations.
    #[must_use]
    pub fn new(specs: &[SpecEntry], icon_dir: Utf8PathBuf, picker: Arc<dyn Picker>) -> Self {
        let mut classes: Vec<Vec<SpecEntry>> = Vec::new();
        for spec in specs {
            let existing = classes
                .iter()
                .position(|group| group.first().is_some_and(|first| first.class == spec.class));
            let position = existing.unwrap_or_else(|| {
                classes.push(Vec::new());
                classes.len().saturating_sub(1)
            });
            if let Some(group) = classes.get_mut(position) {
                group.push(spec.clone());
            }
        }
        Self {
            classes,
            icon_dir,
            picker,
        }
    }
}

impl std::fmt::Debug for PickHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickHandler")
            .field("classes", &self.classes.len())
            .field("icon_dir", &self.icon_dir)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CommandHandler for PickHandler {
    async fn handle(&self, invocation: &Invocation) -> HandlerResult {
        let Some(spec) = pick(self.picker.as_ref(), &self.classes)
            .and_then(|specs| pick(self.picker.as_ref(), specs))
        else {
            return Ok(CommandResponse::text("No specializations are configured.").ephemeral());
        };

        let icon = Attachment {
            filename: spec.icon.clone(),
            path: self.icon_dir.join(&spec.icon),
        };
        let embed = Embed::titled(format!(
            "You should play {} {} ({})",
            spec.spec, spec.class, spec.role
        ))
        .color(spec.color)
        .description(spec.description.clone())
        .thumbnail(icon.embed_url())
        .author(invocation.context().display_name(), None);
        Ok(CommandResponse::embed(embed).with_attachment(icon))
    }
}

/// Lists regular files in `dir`, sorted by name.
///
/// # Errors
///
/// Returns the I/O error when the directory cannot be opened or read.
pub fn list_media(dir: &Utf8Path) -> io::Result<Vec<String>> {
    let directory = Dir::open_ambient_dir(dir, ambient_authority())?;
    let mut names = Vec::new();
    for entry in directory.entries()? {
        let file = entry?;
        if file.file_type()?.is_file() {
            names.push(file.file_name()?);
        }
    }
    names.sort();
    Ok(names)
}

/// Sends a random picture from the media directory.
#[derive(Clone)]
pub struct MightconHandler {
    dir: Utf8PathBuf,
    picker: Arc<dyn Picker>,
}

impl MightconHandler {
    /// Creates a handler serving pictures from `dir`.
    #[must_use]
    pub const fn new(dir: Utf8PathBuf, picker: Arc<dyn Picker>) -> Self {
        Self { dir, picker }
    }
}

impl std::fmt::Debug for MightconHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MightconHandler")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CommandHandler for MightconHandler {
    async fn handle(&self, _invocation: &Invocation) -> HandlerResult {
        let dir = self.dir.clone();
        let names = tokio::task::spawn_blocking(move || list_media(&dir))
            .await
            .map_err(HandlerError::media)?
            .map_err(HandlerError::media)?;
        debug!(count = names.len(), dir = %self.dir, "listed media");

        let image = pick(self.picker.as_ref(), &names).ok_or_else(|| {
            HandlerError::media(io::Error::other(format!("{} holds no pictures", self.dir)))
        })?;
        let attachment = Attachment {
            filename: image.clone(),
            path: self.dir.join(image),
        };
        let embed = Embed::titled("Mightcon 2: Las Vegas")
            .description("Random memory from Mightcon 2!")
            .color(MIGHTCON_COLOR)
            .url(MIGHTCON_ALBUM_URL)
            .image(attachment.embed_url());
        Ok(CommandResponse::embed(embed).with_attachment(attachment))
    }
}
