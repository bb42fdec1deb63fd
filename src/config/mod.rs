//! Bot configuration.
//!
//! Settings come from a TOML file (path taken from `BEYMAX_CONFIG`, default
//! `beymax.toml`); API secrets come from the environment, with a `.env`
//! file honoured when present. The loaded [`BotConfig`] is immutable and
//! shared by reference with everything built from it.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::command::domain::{Blacklist, CommandName, CooldownSpec, GuildId, RoleId, UserId};
use crate::readiness::domain::{DEFAULT_EXEMPT_SLOT, EnchantCatalog, GearSlot};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "BEYMAX_CONFIG";
/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "beymax.toml";

const BATTLE_NET_CLIENT_ID_ENV: &str = "BATTLE_NET_CLIENT_ID";
const BATTLE_NET_CLIENT_SECRET_ENV: &str = "BATTLE_NET_CLIENT_SECRET";
const YOUTUBE_API_KEY_ENV: &str = "YOUTUBE_API_KEY";
const GOOGLE_SHEETS_API_KEY_ENV: &str = "GOOGLE_SHEETS_API_KEY";

/// Errors raised while loading configuration. All of them are fatal at
/// startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`BotConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that was parsed.
        path: Utf8PathBuf,
        /// Underlying parse error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A required secret is absent from the environment.
    #[error("environment variable {0} is not set")]
    MissingSecret(&'static str),

    /// A setting holds a value the bot cannot use.
    #[error("invalid setting {setting}: {reason}")]
    Invalid {
        /// Dotted path of the setting.
        setting: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Sliding-window cooldown as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CooldownSettings {
    /// Invocations allowed per window.
    pub max_invocations: u32,
    /// Window length in seconds.
    pub window_seconds: u64,
}

impl Default for CooldownSettings {
    fn default() -> Self {
        Self {
            max_invocations: 1,
            window_seconds: 10,
        }
    }
}

impl CooldownSettings {
    fn to_spec(self, setting: &str) -> Result<CooldownSpec, ConfigError> {
        CooldownSpec::new(self.max_invocations, self.window_seconds).map_err(|err| {
            ConfigError::Invalid {
                setting: setting.to_owned(),
                reason: err.to_string(),
            }
        })
    }
}

/// Realm and region the game commands report on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    /// API region, for example `us`.
    pub region: String,
    /// Response locale, for example `en_US`.
    pub locale: String,
    /// Connected realm id reported by `/status`.
    pub realm_id: u32,
    /// Realm name used as the `/status` title and the `/r2r` default.
    pub realm_name: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            region: "us".to_owned(),
            locale: "en_US".to_owned(),
            realm_id: 99,
            realm_name: "Arygos".to_owned(),
        }
    }
}

/// Where the raid requirement lives and which slots are checked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadinessSettings {
    /// Spreadsheet holding the requirement.
    pub spreadsheet_id: String,
    /// Sheet name or A1 range of the requirement table.
    pub range: String,
    /// Link shown on the readiness embed title.
    pub sheet_url: Option<String>,
    /// Slots every character must enchant, in report order.
    pub expected_slots: Vec<GearSlot>,
    /// Slot never checked.
    pub exempt_slot: GearSlot,
    /// Role names allowed to run `/r2r`, resolved through `roles`. At least
    /// one must resolve; an empty list opens the command to everyone.
    pub allowed_roles: Vec<String>,
}

impl Default for ReadinessSettings {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            range: "Raid Requirements".to_owned(),
            sheet_url: None,
            expected_slots: GearSlot::default_expected(),
            exempt_slot: GearSlot::new(DEFAULT_EXEMPT_SLOT),
            allowed_roles: ["GM", "Assistant GM", "Guild Officer", "Guild Leader", "Guild Member"]
                .map(str::to_owned)
                .to_vec(),
        }
    }
}

/// Movie list spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovieSettings {
    /// Spreadsheet holding the movie list.
    pub spreadsheet_id: String,
    /// Sheet name or A1 range with one movie per row.
    pub range: String,
}

impl Default for MovieSettings {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            range: "Movies".to_owned(),
        }
    }
}

/// Local directories holding media attachments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaSettings {
    /// Pictures served by `/mightcon2`.
    pub mightcon_dir: Utf8PathBuf,
    /// Spec icons attached by `/pick`.
    pub icon_dir: Utf8PathBuf,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            mightcon_dir: Utf8PathBuf::from("mightcon2_pics"),
            icon_dir: Utf8PathBuf::from("wow_icons"),
        }
    }
}

/// One playable class specialization offered by `/pick`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecEntry {
    /// Class name.
    pub class: String,
    /// Specialization name.
    pub spec: String,
    /// Embed colour.
    pub color: u32,
    /// Group role, for example `Healer`.
    pub role: String,
    /// Short description.
    pub description: String,
    /// Icon file name inside the icon directory.
    pub icon: String,
}

/// Upstream endpoints and request timeout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamSettings {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Fail at startup when an API secret is missing instead of disabling
    /// the commands that need it.
    pub require_secrets: bool,
    /// Game data API base; `{region}` is substituted.
    pub battle_net_api_base: Option<String>,
    /// Game data OAuth token endpoint.
    pub battle_net_oauth_url: Option<String>,
    /// Character profile API host.
    pub raider_io_base: Option<String>,
    /// Video search API base.
    pub youtube_base: Option<String>,
    /// Spreadsheet values API base.
    pub sheets_base: Option<String>,
    /// Quote API host.
    pub wow_quote_base: Option<String>,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            require_secrets: false,
            battle_net_api_base: None,
            battle_net_oauth_url: None,
            raider_io_base: None,
            youtube_base: None,
            sheets_base: None,
            wow_quote_base: None,
        }
    }
}

impl UpstreamSettings {
    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

const fn default_deadline_secs() -> u64 {
    10
}

/// Complete bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Guild the commands are registered in.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// Upper bound on one handler run, in seconds.
    #[serde(default = "default_deadline_secs")]
    pub handler_deadline_secs: u64,
    /// Users refused every command.
    #[serde(default)]
    pub blacklist: Vec<UserId>,
    /// Cooldown applied to rate-limited commands.
    #[serde(default)]
    pub cooldown: CooldownSettings,
    /// Per-command cooldown replacements keyed by command name.
    #[serde(default)]
    pub cooldown_overrides: BTreeMap<String, CooldownSettings>,
    /// Guild role ids keyed by role name.
    #[serde(default)]
    pub roles: BTreeMap<String, RoleId>,
    /// Realm and region settings.
    #[serde(default)]
    pub game: GameSettings,
    /// Raid readiness settings.
    #[serde(default)]
    pub readiness: ReadinessSettings,
    /// Enchant id to display name.
    #[serde(default)]
    pub enchants: EnchantCatalog,
    /// Embed colour per class name.
    #[serde(default)]
    pub class_colors: BTreeMap<String, u32>,
    /// Specializations offered by `/pick`.
    #[serde(default)]
    pub specs: Vec<SpecEntry>,
    /// Gifs served by `/kat`.
    #[serde(default)]
    pub kat_gifs: Vec<String>,
    /// Movie list settings.
    #[serde(default)]
    pub movies: MovieSettings,
    /// Media directories.
    #[serde(default)]
    pub media: MediaSettings,
    /// Upstream endpoints.
    #[serde(default)]
    pub upstream: UpstreamSettings,
}

impl BotConfig {
    /// Loads `.env`, then the file named by [`CONFIG_PATH_ENV`] (or
    /// [`DEFAULT_CONFIG_PATH`]).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed or
    /// validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
        Self::load(Utf8Path::new(&path))
    }

    /// Reads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed or
    /// validated.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = read_file(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|err| match err {
            ParseFailure::Toml(source) => ConfigError::Parse {
                path: path.to_owned(),
                source: Box::new(source),
            },
            ParseFailure::Invalid(invalid) => invalid,
        })?;
        debug!(%path, "configuration loaded");
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for unusable values, and
    /// [`ConfigError::Parse`] (with an empty path) for malformed TOML.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text).map_err(|err| match err {
            ParseFailure::Toml(source) => ConfigError::Parse {
                path: Utf8PathBuf::new(),
                source: Box::new(source),
            },
            ParseFailure::Invalid(invalid) => invalid,
        })
    }

    fn parse(text: &str) -> Result<Self, ParseFailure> {
        let mut config: Self = toml::from_str(text).map_err(ParseFailure::Toml)?;
        config.normalize_overrides().map_err(ParseFailure::Invalid)?;
        config.validate().map_err(ParseFailure::Invalid)?;
        Ok(config)
    }

    /// Re-keys `cooldown_overrides` by normalized command name so lookups
    /// match the registry regardless of case.
    fn normalize_overrides(&mut self) -> Result<(), ConfigError> {
        let raw = std::mem::take(&mut self.cooldown_overrides);
        for (command, settings) in raw {
            let setting = format!("cooldown_overrides.{command}");
            let name = CommandName::new(command.as_str())
                .map_err(|err| invalid(&setting, &err.to_string()))?;
            let key = String::from(name);
            if self.cooldown_overrides.insert(key, settings).is_some() {
                return Err(invalid(&setting, "names a command that already has an override"));
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.handler_deadline_secs == 0 {
            return Err(invalid("handler_deadline_secs", "must be positive"));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(invalid("upstream.timeout_secs", "must be positive"));
        }
        self.cooldown.to_spec("cooldown")?;
        for (command, settings) in &self.cooldown_overrides {
            settings.to_spec(&format!("cooldown_overrides.{command}"))?;
        }
        if self.readiness.expected_slots.contains(&self.readiness.exempt_slot) {
            return Err(invalid(
                "readiness.exempt_slot",
                "must not also be an expected slot",
            ));
        }
        for role in &self.readiness.allowed_roles {
            if !self.roles.contains_key(role) {
                warn!(role = %role, "readiness role has no id in [roles]; it is ignored");
            }
        }
        if !self.readiness.allowed_roles.is_empty() && self.readiness_roles().is_empty() {
            return Err(invalid(
                "readiness.allowed_roles",
                "none of the listed roles has an id in [roles]",
            ));
        }
        Ok(())
    }

    /// Returns the handler deadline.
    #[must_use]
    pub const fn handler_deadline(&self) -> Duration {
        Duration::from_secs(self.handler_deadline_secs)
    }

    /// Returns the loaded blacklist.
    #[must_use]
    pub fn blacklist(&self) -> Arc<Blacklist> {
        Arc::new(Blacklist::new(self.blacklist.iter().copied()))
    }

    /// Returns the cooldown for `command`, honouring overrides. `command`
    /// is expected in normalized (lower-case) form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the configured values are
    /// unusable.
    pub fn cooldown_for(&self, command: &str) -> Result<CooldownSpec, ConfigError> {
        match self.cooldown_overrides.get(command) {
            Some(settings) => settings.to_spec(&format!("cooldown_overrides.{command}")),
            None => self.cooldown.to_spec("cooldown"),
        }
    }

    /// Returns the role ids allowed to run `/r2r`.
    #[must_use]
    pub fn readiness_roles(&self) -> Vec<RoleId> {
        self.readiness
            .allowed_roles
            .iter()
            .filter_map(|role| self.roles.get(role).copied())
            .collect()
    }
}

enum ParseFailure {
    Toml(toml::de::Error),
    Invalid(ConfigError),
}

fn invalid(setting: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        setting: setting.to_owned(),
        reason: reason.to_owned(),
    }
}

/// Opens the directory containing `path` and reads the file through it.
fn read_file(path: &Utf8Path) -> std::io::Result<String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other(format!("{path} does not name a file")))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(file_name)
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => debug!(".env not present"),
        Err(err) => warn!(error = %err, "ignoring unreadable .env"),
    }
}

/// API credentials read from the environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    /// Game data client id and secret.
    pub battle_net: Option<(String, String)>,
    /// Video search API key.
    pub youtube_api_key: Option<String>,
    /// Spreadsheet API key.
    pub sheets_api_key: Option<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("battle_net", &self.battle_net.is_some())
            .field("youtube_api_key", &self.youtube_api_key.is_some())
            .field("sheets_api_key", &self.sheets_api_key.is_some())
            .finish()
    }
}

impl Secrets {
    /// Reads secrets from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSecret`] for the first absent secret
    /// when `require_all` is set.
    pub fn from_env(require_all: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok(), require_all)
    }

    /// Reads secrets through `lookup`. Empty values count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSecret`] for the first absent secret
    /// when `require_all` is set.
    pub fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
        require_all: bool,
    ) -> Result<Self, ConfigError> {
        let read = |name: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(name).filter(|value| !value.trim().is_empty()) {
                Some(value) => Ok(Some(value)),
                None if require_all => Err(ConfigError::MissingSecret(name)),
                None => {
                    warn!(variable = name, "secret not set; dependent commands are disabled");
                    Ok(None)
                }
            }
        };

        let client_id = read(BATTLE_NET_CLIENT_ID_ENV)?;
        let client_secret = read(BATTLE_NET_CLIENT_SECRET_ENV)?;
        Ok(Self {
            battle_net: client_id.zip(client_secret),
            youtube_api_key: read(YOUTUBE_API_KEY_ENV)?,
            sheets_api_key: read(GOOGLE_SHEETS_API_KEY_ENV)?,
        })
    }
}
