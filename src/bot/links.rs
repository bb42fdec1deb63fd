//! Commands that answer with a fixed link.

use async_trait::async_trait;

use super::calendar::{SeasonalVariant, seasonal_variant};
use crate::command::{
    domain::{CommandResponse, Invocation},
    ports::{CommandHandler, HandlerResult},
};

/// One fixed-reply command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticLink {
    /// Command name.
    pub name: &'static str,
    /// Description shown by the host.
    pub description: &'static str,
    /// Reply sent on ordinary days.
    pub reply: &'static str,
    /// Reply sent on Halloween, if the command has one.
    pub halloween_reply: Option<&'static str>,
}

const fn link(name: &'static str, description: &'static str, reply: &'static str) -> StaticLink {
    StaticLink {
        name,
        description,
        reply,
        halloween_reply: None,
    }
}

/// Every fixed-reply command, in registration order.
pub const STATIC_LINKS: &[StaticLink] = &[
    StaticLink {
        name: "spooky",
        description: "There's always money in the banana stand!",
        reply: "https://tenor.com/view/arrested-development-claw-hand-juice-box-laughing-evil-laugh-gif-5335530",
        halloween_reply: Some(
            "Happy Halloween! There's always money in the banana stand!\nhttps://tenor.com/view/arrested-development-claw-hand-juice-box-laughing-evil-laugh-gif-5335530",
        ),
    },
    link("scrumpy", "Just his opinion", "Thinks your bags are awful"),
    link(
        "golfclap",
        "Well played",
        "https://tenor.com/view/charlie-sheen-emilio-estevez-golf-clap-men-at-work-gif-7577611",
    ),
    link(
        "whatever",
        "Whatever man",
        "https://media.discordapp.net/attachments/765619338337058827/802299499908563024/whatever.gif",
    ),
    link(
        "cool",
        "Peralta says",
        "https://tenor.com/view/andy-samberg-brooklyn99-jake-peralta-cool-gif-12063970",
    ),
    link(
        "myst",
        "Is it though?",
        "https://tenor.com/view/is-it-though-thor-smile-gif-13334930",
    ),
    link(
        "myst2",
        "I mean...",
        "https://tenor.com/view/shrug-what-huh-will-smith-i-mean-gif-15916247",
    ),
    link("beylock", "I love this song", "https://imgur.com/a/xux2u6p"),
    link(
        "happybirthday",
        "Party at Kat's place!",
        "https://giphy.com/gifs/i8htPQwChFOVcpnImq",
    ),
    link(
        "magic",
        "Don't ask how",
        "https://media.discordapp.net/attachments/676183284123828236/761438362720272394/Kat_Confetti.gif",
    ),
    link(
        "lynkz",
        "Who is that?",
        "https://media.discordapp.net/attachments/676183284123828236/899091363046522910/unknown.png",
    ),
    link(
        "candercane",
        "This child is furious",
        "https://giphy.com/gifs/angry-mad-anger-l1J9u3TZfpmeDLkD6",
    ),
    link("wat", "wat", "https://imgur.com/a/PnB5eFk"),
    link("thisisfine", "I'll probably survive", "https://imgur.com/a/uDAO5In"),
    link("pirate", "Pirate shimmy!", "https://imgur.com/a/TDot4Ba"),
    link("suckit", "Suck it!", "https://imgur.com/Fy6RhWI"),
    link(
        "risn",
        "K",
        "https://www.circlek.com/themes/custom/circlek/images/logos/logo-full-color-rgb.jpg",
    ),
    link(
        "hakkd",
        "Don't let it happen again",
        "https://tenor.com/view/mad-monster-dont-let-it-happen-again-gif-14024298",
    ),
    link(
        "wtf",
        "What the fuck?",
        "https://giphy.com/gifs/what-the-fuck-wtf-ukGm72ZLZvYfS",
    ),
    link(
        "rain",
        "Lil bih",
        "https://cdn.discordapp.com/attachments/676183384061378571/856642945481310228/unknown.png",
    ),
    link(
        "imout",
        "Peace out",
        "https://media.discordapp.net/attachments/676183306924064768/866005404839837706/sylvanas.gif",
    ),
    link(
        "daddychill",
        "What the hell is even that?!",
        "https://tenor.com/view/what-the-hell-is-even-gif-20535402",
    ),
    link(
        "guacdrop",
        "Not the guacamole!",
        "https://media.discordapp.net/attachments/917450971569877044/917465265036488704/20211105_213516.jpg",
    ),
    link(
        "rightright",
        "From a show about nothing",
        "https://tenor.com/view/seinfeld-jerry-seinfeld-oh-right-agree-gif-4436696",
    ),
    link(
        "shit",
        "Get your poop in a group",
        "https://giphy.com/gifs/get-well-then-woTdBa435yy6A",
    ),
    link(
        "hydrate",
        "Hydration is important",
        "https://tenor.com/view/water-smile-drink-water-gif-13518129",
    ),
    link(
        "spoon",
        "My spoon is too big",
        "https://media.discordapp.net/attachments/503025662546935809/747820543918735370/A_little_party_never_killed_no_body_gif.gif",
    ),
    link(
        "imdumb",
        "I'm dumb",
        "https://tenor.com/view/winston-schmidt-max-greenfield-new-girl-gif-15041554",
    ),
    link(
        "aster",
        "That face. That goddamn face.",
        "https://cdn.discordapp.com/attachments/938971434246631435/940347663533084732/Chaotic_Aster.png",
    ),
    link(
        "drew",
        "Cold. Dead. Lifeless.",
        "https://tenor.com/view/sparkly-eyes-joy-happy-anime-hug-gif-15852045",
    ),
    link(
        "pig",
        "This little piggy...",
        "https://tenor.com/view/pig-cute-gif-21946909",
    ),
    link(
        "listen",
        "listen here",
        "https://i.pinimg.com/originals/ef/a6/48/efa648c67f3cb05287ded99612af130f.png",
    ),
    link(
        "nyrixx",
        "Never sneak up on a Schrute.",
        "https://tenor.com/view/office-dwight-schrute-surprised-gif-14541388",
    ),
    link(
        "yzu",
        "eli5",
        "https://tenor.com/view/confused-the-office-michael-scott-steve-carell-explain-this-to-me-like-im-five-gif-4527435",
    ),
    link(
        "ben",
        "Finger",
        "https://media.discordapp.net/attachments/199644505845137408/798327813479727114/2015-02-10.gif",
    ),
    link(
        "cheat",
        "Get excited",
        "https://tenor.com/view/the-office-space-umm-wow-ok-then-gif-15829379",
    ),
    link(
        "cheers",
        "Cheers mate",
        "https://cdn.discordapp.com/attachments/775444197468667904/1042974872407646218/trim.9B102A43-2EA1-4846-847C-25468EB6804C.gif",
    ),
    link("dontdothat", "Don't do that", "https://imgur.com/a/xEKQA8H"),
    link(
        "specimen",
        "Nope",
        "https://tenor.com/view/run-running-rumning-away-gif-26050933",
    ),
    link(
        "sixtynine",
        "Nice",
        "https://cdn.discordapp.com/attachments/1039705067235835934/1043215596181016666/IMG_3549.jpg",
    ),
];

impl StaticLink {
    /// Returns the reply for `variant`, falling back to the ordinary reply.
    #[must_use]
    pub const fn reply_for(&self, variant: SeasonalVariant) -> &'static str {
        match (variant, self.halloween_reply) {
            (SeasonalVariant::Halloween, Some(reply)) => reply,
            _ => self.reply,
        }
    }
}

/// Answers with one entry of [`STATIC_LINKS`].
#[derive(Debug, Clone, Copy)]
pub struct StaticLinkHandler {
    link: StaticLink,
}

impl StaticLinkHandler {
    /// Creates a handler for `link`.
    #[must_use]
    pub const fn new(link: StaticLink) -> Self {
        Self { link }
    }
}

#[async_trait]
impl CommandHandler for StaticLinkHandler {
    async fn handle(&self, invocation: &Invocation) -> HandlerResult {
        let variant = seasonal_variant(invocation.context().timestamp().date_naive());
        Ok(CommandResponse::text(self.link.reply_for(variant)))
    }
}
