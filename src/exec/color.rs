// src/exec/color.rs

//! Colorizing of displayed output.
//!
//! A [`Palette`] is whatever set of named transforms a caller (or the config
//! file) provides; any slot may be missing. A [`Colorizer`] is the resolved
//! form the executor uses: exactly four transforms (`prompt`, `command`,
//! `stdout`, `stderr`), each filled through a fixed fallback chain:
//!
//! | slot      | first match wins                                |
//! |-----------|-------------------------------------------------|
//! | `prompt`  | `prompt`, `command`, `gray`, `grey`, default     |
//! | `command` | `command`, `gray`, `grey`, default               |
//! | `stdout`  | `stdout`, `green`, default                       |
//! | `stderr`  | `stderr`, `red`, default                         |
//!
//! "default" is the process-wide colorizer from [`default_colorizer`],
//! probed once from an ordered provider list and cached.

use std::collections::BTreeMap;
use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::exec::terminal::Channel;

/// A text decoration function.
pub type Transform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The pass-through transform.
pub fn identity() -> Transform {
    Arc::new(|s: &str| s.to_owned())
}

/// Bind a method to the object it needs as context.
///
/// ```
/// use std::sync::Arc;
/// use justrun::exec::color::bind;
///
/// struct Prefixer { tag: String }
/// impl Prefixer {
///     fn apply(&self, s: &str) -> String { format!("[{}] {s}", self.tag) }
/// }
///
/// let t = bind(Arc::new(Prefixer { tag: "out".into() }), Prefixer::apply);
/// assert_eq!(t("hi"), "[out] hi");
/// ```
pub fn bind<T>(target: Arc<T>, method: fn(&T, &str) -> String) -> Transform
where
    T: Send + Sync + 'static,
{
    Arc::new(move |s: &str| method(&target, s))
}

/// Named slots a palette may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Prompt,
    Command,
    Stdout,
    Stderr,
    Gray,
    Grey,
    Green,
    Red,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Slot::Prompt,
        Slot::Command,
        Slot::Stdout,
        Slot::Stderr,
        Slot::Gray,
        Slot::Grey,
        Slot::Green,
        Slot::Red,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Prompt => "prompt",
            Slot::Command => "command",
            Slot::Stdout => "stdout",
            Slot::Stderr => "stderr",
            Slot::Gray => "gray",
            Slot::Grey => "grey",
            Slot::Green => "green",
            Slot::Red => "red",
        }
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Slot::ALL
            .into_iter()
            .find(|slot| slot.name() == wanted)
            .ok_or_else(|| format!("unknown color slot '{s}'"))
    }
}

/// ANSI SGR styles usable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiStyle {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    Bold,
    Dim,
}

impl AnsiStyle {
    fn codes(self) -> (u8, u8) {
        match self {
            AnsiStyle::Black => (30, 39),
            AnsiStyle::Red => (31, 39),
            AnsiStyle::Green => (32, 39),
            AnsiStyle::Yellow => (33, 39),
            AnsiStyle::Blue => (34, 39),
            AnsiStyle::Magenta => (35, 39),
            AnsiStyle::Cyan => (36, 39),
            AnsiStyle::White => (37, 39),
            AnsiStyle::Gray => (90, 39),
            AnsiStyle::Bold => (1, 22),
            AnsiStyle::Dim => (2, 22),
        }
    }

    pub fn paint(self, s: &str) -> String {
        if s.is_empty() {
            return String::new();
        }
        let (open, close) = self.codes();
        format!("\x1b[{open}m{s}\x1b[{close}m")
    }

    pub fn transform(self) -> Transform {
        Arc::new(move |s: &str| self.paint(s))
    }
}

impl FromStr for AnsiStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "black" => Ok(AnsiStyle::Black),
            "red" => Ok(AnsiStyle::Red),
            "green" => Ok(AnsiStyle::Green),
            "yellow" => Ok(AnsiStyle::Yellow),
            "blue" => Ok(AnsiStyle::Blue),
            "magenta" => Ok(AnsiStyle::Magenta),
            "cyan" => Ok(AnsiStyle::Cyan),
            "white" => Ok(AnsiStyle::White),
            "gray" | "grey" => Ok(AnsiStyle::Gray),
            "bold" => Ok(AnsiStyle::Bold),
            "dim" => Ok(AnsiStyle::Dim),
            other => Err(format!("unknown color style '{other}'")),
        }
    }
}

/// A partial set of named transforms.
#[derive(Clone, Default)]
pub struct Palette {
    slots: BTreeMap<Slot, Transform>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// The palette the ANSI default provides: `gray`, `green` and `red`.
    pub fn ansi() -> Self {
        Self::new()
            .with_transform(Slot::Gray, AnsiStyle::Gray.transform())
            .with_transform(Slot::Green, AnsiStyle::Green.transform())
            .with_transform(Slot::Red, AnsiStyle::Red.transform())
    }

    pub fn with<F>(self, slot: Slot, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.with_transform(slot, Arc::new(f))
    }

    pub fn with_transform(mut self, slot: Slot, transform: Transform) -> Self {
        self.slots.insert(slot, transform);
        self
    }

    pub fn get(&self, slot: Slot) -> Option<&Transform> {
        self.slots.get(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn first_of(&self, chain: &[Slot]) -> Option<Transform> {
        chain.iter().find_map(|slot| self.get(*slot).cloned())
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.slots.keys().map(|slot| slot.name()))
            .finish()
    }
}

/// How displayed text should be decorated.
#[derive(Debug, Clone, Default)]
pub enum ColorChoice {
    /// No decoration at all.
    Off,
    /// Use the process-wide default colorizer.
    #[default]
    Auto,
    /// Use this palette, falling back to the default for missing slots.
    Custom(Palette),
}

impl From<bool> for ColorChoice {
    fn from(enabled: bool) -> Self {
        if enabled {
            ColorChoice::Auto
        } else {
            ColorChoice::Off
        }
    }
}

impl From<Palette> for ColorChoice {
    fn from(palette: Palette) -> Self {
        ColorChoice::Custom(palette)
    }
}

/// The four resolved transforms used by the executor.
#[derive(Clone)]
pub struct Colorizer {
    prompt: Transform,
    command: Transform,
    stdout: Transform,
    stderr: Transform,
}

impl Colorizer {
    /// All four transforms are identity.
    pub fn plain() -> Self {
        Self {
            prompt: identity(),
            command: identity(),
            stdout: identity(),
            stderr: identity(),
        }
    }

    pub fn resolve(choice: &ColorChoice) -> Self {
        match choice {
            ColorChoice::Off => Self::plain(),
            ColorChoice::Auto => default_colorizer().clone(),
            ColorChoice::Custom(palette) => Self::from_palette(palette, default_colorizer()),
        }
    }

    /// Fill each slot from `palette` through its fallback chain, taking the
    /// matching transform of `fallback` when the chain comes up empty.
    pub fn from_palette(palette: &Palette, fallback: &Colorizer) -> Self {
        Self {
            prompt: palette
                .first_of(&[Slot::Prompt, Slot::Command, Slot::Gray, Slot::Grey])
                .unwrap_or_else(|| fallback.prompt.clone()),
            command: palette
                .first_of(&[Slot::Command, Slot::Gray, Slot::Grey])
                .unwrap_or_else(|| fallback.command.clone()),
            stdout: palette
                .first_of(&[Slot::Stdout, Slot::Green])
                .unwrap_or_else(|| fallback.stdout.clone()),
            stderr: palette
                .first_of(&[Slot::Stderr, Slot::Red])
                .unwrap_or_else(|| fallback.stderr.clone()),
        }
    }

    pub fn prompt(&self, s: &str) -> String {
        (self.prompt)(s)
    }

    pub fn command(&self, s: &str) -> String {
        (self.command)(s)
    }

    pub fn stdout(&self, s: &str) -> String {
        (self.stdout)(s)
    }

    pub fn stderr(&self, s: &str) -> String {
        (self.stderr)(s)
    }

    pub fn for_channel(&self, channel: Channel) -> Transform {
        match channel {
            Channel::Stdout => self.stdout.clone(),
            Channel::Stderr => self.stderr.clone(),
        }
    }
}

impl fmt::Debug for Colorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Colorizer").finish_non_exhaustive()
    }
}

/// One optional source of a default palette.
#[derive(Debug, Clone, Copy)]
pub struct Provider {
    pub name: &'static str,
    pub lookup: fn() -> Option<Palette>,
}

/// Providers tried, in order, for the process-wide default.
pub const DEFAULT_PROVIDERS: &[Provider] = &[
    Provider {
        name: "NO_COLOR",
        lookup: no_color_requested,
    },
    Provider {
        name: "FORCE_COLOR",
        lookup: color_forced,
    },
    Provider {
        name: "terminal",
        lookup: stdout_is_terminal,
    },
];

fn no_color_requested() -> Option<Palette> {
    std::env::var_os("NO_COLOR")
        .filter(|v| !v.is_empty())
        .map(|_| Palette::new())
}

fn color_forced() -> Option<Palette> {
    ["CLICOLOR_FORCE", "FORCE_COLOR"]
        .iter()
        .filter_map(|key| std::env::var_os(key))
        .any(|v| !v.is_empty() && v != "0")
        .then(Palette::ansi)
}

fn stdout_is_terminal() -> Option<Palette> {
    std::io::stdout().is_terminal().then(Palette::ansi)
}

/// Walk `providers` in order; the first palette found wins. Identity when
/// none match.
pub fn probe(providers: &[Provider]) -> Colorizer {
    let plain = Colorizer::plain();
    for provider in providers {
        if let Some(palette) = (provider.lookup)() {
            debug!(provider = provider.name, ?palette, "default colorizer selected");
            return Colorizer::from_palette(&palette, &plain);
        }
    }
    debug!("no color provider matched; output will not be decorated");
    plain
}

static DEFAULT_COLORIZER: OnceLock<Colorizer> = OnceLock::new();

/// The process-wide default colorizer, probed on first use.
pub fn default_colorizer() -> &'static Colorizer {
    DEFAULT_COLORIZER.get_or_init(|| probe(DEFAULT_PROVIDERS))
}
