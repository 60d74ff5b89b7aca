use serde::{Deserialize, Serialize};

/// User configuration.
///
/// Every field is optional; missing values fall back to the defaults below.
///
/// Example YAML:
/// ```yaml
/// scoring_method: pairs
/// color: auto
/// export:
///   dir: ~/results
///   csv_delimiter: ";"
/// labels:
///   draw: Unentschieden
///   excluded: Ja
///   competing: Nein
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Which team-mode result is announced as the winner (default: total)
    #[serde(default)]
    pub scoring_method: Option<ScoringMethod>,

    /// Terminal colour mode (default: auto)
    #[serde(default)]
    pub color: Option<ColorMode>,

    #[serde(default)]
    pub export: Option<ExportConfig>,

    #[serde(default)]
    pub labels: Option<LabelConfig>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMethod {
    /// Sum of competing members' totals
    #[default]
    Total,
    /// Count of won pairings
    Pairs,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory for export files when no output path is given
    #[serde(default)]
    pub dir: Option<String>,

    /// Single ASCII character (default: ",")
    #[serde(default)]
    pub csv_delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LabelConfig {
    #[serde(default)]
    pub draw: Option<String>,
    /// Shown in the AK column for members outside competition
    #[serde(default)]
    pub excluded: Option<String>,
    #[serde(default)]
    pub competing: Option<String>,
}

/// Display words with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub draw: String,
    pub excluded: String,
    pub competing: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            draw: "Draw".to_string(),
            excluded: "Yes".to_string(),
            competing: "No".to_string(),
        }
    }
}

impl Config {
    pub fn scoring_method(&self) -> ScoringMethod {
        self.scoring_method.unwrap_or_default()
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.unwrap_or_default()
    }

    pub fn labels(&self) -> Labels {
        let defaults = Labels::default();
        match &self.labels {
            Some(l) => Labels {
                draw: l.draw.clone().unwrap_or(defaults.draw),
                excluded: l.excluded.clone().unwrap_or(defaults.excluded),
                competing: l.competing.clone().unwrap_or(defaults.competing),
            },
            None => defaults,
        }
    }

    /// Delimiter byte for CSV export. Call after `validate_config`.
    pub fn csv_delimiter(&self) -> u8 {
        self.export
            .as_ref()
            .and_then(|e| e.csv_delimiter.as_deref())
            .and_then(|d| d.bytes().next())
            .unwrap_or(b',')
    }

    pub fn export_dir(&self) -> Option<&str> {
        self.export.as_ref().and_then(|e| e.dir.as_deref())
    }

    /// Config written by `score-vault init`, with every default spelled out.
    pub fn starter() -> Self {
        let labels = Labels::default();
        Self {
            scoring_method: Some(ScoringMethod::Total),
            color: Some(ColorMode::Auto),
            export: Some(ExportConfig {
                dir: None,
                csv_delimiter: Some(",".to_string()),
            }),
            labels: Some(LabelConfig {
                draw: Some(labels.draw),
                excluded: Some(labels.excluded),
                competing: Some(labels.competing),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config.scoring_method(), ScoringMethod::Total);
        assert_eq!(config.color_mode(), ColorMode::Auto);
        assert_eq!(config.labels(), Labels::default());
        assert_eq!(config.csv_delimiter(), b',');
        assert!(config.export_dir().is_none());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
scoring_method: pairs
color: never
export:
  dir: /tmp/results
  csv_delimiter: ";"
labels:
  draw: Unentschieden
  excluded: Ja
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.scoring_method(), ScoringMethod::Pairs);
        assert_eq!(config.color_mode(), ColorMode::Never);
        assert_eq!(config.csv_delimiter(), b';');
        assert_eq!(config.export_dir(), Some("/tmp/results"));

        let labels = config.labels();
        assert_eq!(labels.draw, "Unentschieden");
        assert_eq!(labels.excluded, "Ja");
        assert_eq!(labels.competing, "No");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_saphyr::from_str::<Config>("queries: []").is_err());
    }

    #[test]
    fn test_starter_config_roundtrip() {
        let config = Config::starter();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
