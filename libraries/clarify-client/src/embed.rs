//! Negotiation of the `embed` query parameter.
//!
//! The API inlines related resources when asked through a comma-separated
//! `embed` list. Tokens are always written in the order
//! `items,tracks,metadata,insights` so that identical requests produce
//! identical URLs.

/// A caller's preference for one embeddable relation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Embed {
    /// No preference: omit on a fresh request, inherit when paginating
    #[default]
    Unspecified,
    /// Ask for the relation to be embedded
    On,
    /// Drop the relation, even if a pagination href carried it
    Off,
}

impl Embed {
    fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// Apply this preference over a value inherited from an href.
    fn resolve(self, inherited: bool) -> bool {
        match self {
            Self::Unspecified => inherited,
            Self::On => true,
            Self::Off => false,
        }
    }
}

impl From<bool> for Embed {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl From<Option<bool>> for Embed {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unspecified, Self::from)
    }
}

/// The four embeddable relations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EmbedFlags {
    pub items: Embed,
    pub tracks: Embed,
    pub metadata: Embed,
    pub insights: Embed,
}

/// Wire tokens in serialization order.
const TOKENS: [&str; 4] = ["items", "tracks", "metadata", "insights"];

impl EmbedFlags {
    /// All relations unspecified.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn items(mut self, embed: impl Into<Embed>) -> Self {
        self.items = embed.into();
        self
    }

    pub fn tracks(mut self, embed: impl Into<Embed>) -> Self {
        self.tracks = embed.into();
        self
    }

    pub fn metadata(mut self, embed: impl Into<Embed>) -> Self {
        self.metadata = embed.into();
        self
    }

    pub fn insights(mut self, embed: impl Into<Embed>) -> Self {
        self.insights = embed.into();
        self
    }

    fn as_array(self) -> [Embed; 4] {
        [self.items, self.tracks, self.metadata, self.insights]
    }
}

fn join(on: [bool; 4]) -> Option<String> {
    let tokens: Vec<&str> = TOKENS
        .iter()
        .zip(on)
        .filter_map(|(token, on)| on.then_some(*token))
        .collect();

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(","))
    }
}

/// Build the `embed` value for a fresh request.
///
/// Only relations set to [`Embed::On`] are included. Returns `None` when
/// nothing is on, in which case the parameter must be omitted.
pub fn compose(flags: &EmbedFlags) -> Option<String> {
    join(flags.as_array().map(Embed::is_on))
}

/// Reconcile `flags` against the `embed` value already present in a
/// pagination href.
///
/// Unspecified flags inherit from `existing`, `On` adds the relation and
/// `Off` removes it.
pub fn override_embed(existing: Option<&str>, flags: &EmbedFlags) -> Option<String> {
    let current = parse(existing);
    let requested = flags.as_array();

    let mut resolved = [false; 4];
    for (slot, (flag, inherited)) in resolved.iter_mut().zip(requested.into_iter().zip(current)) {
        *slot = flag.resolve(inherited);
    }

    join(resolved)
}

/// Which relations an existing `embed` value turns on.
fn parse(existing: Option<&str>) -> [bool; 4] {
    let mut on = [false; 4];
    let Some(existing) = existing else {
        return on;
    };

    for token in existing.split(',').map(str::trim) {
        if let Some(index) = TOKENS.iter().position(|t| *t == token) {
            on[index] = true;
        }
    }
    on
}
