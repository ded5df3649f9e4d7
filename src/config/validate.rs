// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{JustrunError, Result};
use crate::exec::color::{AnsiStyle, Palette, Slot};
use crate::exec::Encoding;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = JustrunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let encoding = validate_encoding(&raw)?;
        validate_env(&raw)?;
        let palette = build_palette(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.run, raw.env, encoding, palette))
    }
}

fn validate_encoding(cfg: &RawConfigFile) -> Result<Encoding> {
    cfg.run
        .encoding
        .parse::<Encoding>()
        .map_err(|e| JustrunError::ConfigError(format!("[run].encoding: {e}")))
}

fn validate_env(cfg: &RawConfigFile) -> Result<()> {
    for (key, value) in cfg.env.iter() {
        if key.is_empty() {
            return Err(JustrunError::ConfigError(
                "[env] contains an empty variable name".to_string(),
            ));
        }
        if key.contains('=') || key.contains('\0') {
            return Err(JustrunError::ConfigError(format!(
                "[env] variable name '{}' must not contain '=' or NUL",
                key.escape_debug()
            )));
        }
        if value.contains('\0') {
            return Err(JustrunError::ConfigError(format!(
                "[env] value of '{key}' must not contain NUL"
            )));
        }
    }
    Ok(())
}

/// Turn the `[color]` table into a palette; `None` when the table is empty.
fn build_palette(cfg: &RawConfigFile) -> Result<Option<Palette>> {
    if cfg.color.is_empty() {
        return Ok(None);
    }

    let mut palette = Palette::new();
    for (slot_name, style_name) in cfg.color.iter() {
        let slot: Slot = slot_name
            .parse()
            .map_err(|e| JustrunError::ConfigError(format!("[color]: {e}")))?;
        let style: AnsiStyle = style_name
            .parse()
            .map_err(|e| JustrunError::ConfigError(format!("[color].{slot_name}: {e}")))?;
        palette = palette.with_transform(slot, style.transform());
    }
    Ok(Some(palette))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Result<ConfigFile> {
        let raw: RawConfigFile = toml::from_str(toml_src)?;
        ConfigFile::try_from(raw)
    }

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = parse("").unwrap();
        let opts = cfg.into_run_options();
        assert!(opts.capture);
        assert!(!opts.quiet);
        assert!(opts.propagate_signals);
        assert_eq!(opts.encoding, Encoding::Utf8);
        assert!(matches!(opts.color, crate::exec::ColorChoice::Auto));
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let err = parse("[run]\nencoding = \"ebcdic\"\n").unwrap_err();
        match err {
            JustrunError::ConfigError(msg) => {
                assert!(msg.contains("[run].encoding"));
                assert!(msg.contains("ebcdic"));
            }
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn env_names_with_equals_are_rejected() {
        let err = parse("[env]\n\"A=B\" = \"x\"\n").unwrap_err();
        assert!(matches!(err, JustrunError::ConfigError(msg) if msg.contains("A=B")));
    }

    #[test]
    fn color_table_builds_custom_palette() {
        let cfg = parse("[color]\nstdout = \"cyan\"\ngrey = \"dim\"\n").unwrap();
        let palette = cfg.palette().expect("palette");
        assert!(palette.get(Slot::Stdout).is_some());
        assert!(palette.get(Slot::Grey).is_some());
        assert!(matches!(
            cfg.into_run_options().color,
            crate::exec::ColorChoice::Custom(_)
        ));
    }

    #[test]
    fn color_false_wins_over_palette() {
        let cfg = parse("[run]\ncolor = false\n[color]\nstdout = \"cyan\"\n").unwrap();
        assert!(matches!(cfg.into_run_options().color, crate::exec::ColorChoice::Off));
    }

    #[test]
    fn unknown_slot_or_style_is_rejected() {
        assert!(matches!(
            parse("[color]\nbackground = \"red\"\n"),
            Err(JustrunError::ConfigError(_))
        ));
        assert!(matches!(
            parse("[color]\nstdout = \"ultraviolet\"\n"),
            Err(JustrunError::ConfigError(_))
        ));
    }
}
