use std::path::PathBuf;

use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{default_colors::*, error::Result, types::locale::Locale};

pub const CONFIG_FILE: &str = "bookmeta.toml";
pub const ENV_PREFIX: &str = "BOOKMETA_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    bold:   bool,
    italic: bool,
    color:  crossterm::style::Color,
}

impl StyleConfig {
    fn style(&self, s: impl ToString) -> String {
        let mut s = s.to_string().with(self.color);
        if self.bold {
            s = s.bold();
        }
        if self.italic {
            s = s.italic();
        }
        s.to_string()
    }
}

pub trait Styleable {
    fn style(&self, c: &StyleConfig) -> String;
}

impl<T> Styleable for T
where
    T: ToString + std::fmt::Display,
{
    fn style(&self, c: &StyleConfig) -> String {
        c.style(self)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color:  COLOR_WHITE,
            bold:   false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub prefix:            String,
    pub suffix:            String,
    pub description:       String,
    pub style_prefix:      StyleConfig,
    pub style_suffix:      StyleConfig,
    pub style_description: StyleConfig,
    pub style_content:     StyleConfig,
}

impl OutputConfig {
    pub fn format_str(&self, content: impl ToString) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        let description = self.description.style(&self.style_description);
        let content = content.to_string().style(&self.style_content);
        format!("{prefix}{description} {content}{suffix}")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix:            "[".into(),
            suffix:            "]".into(),
            description:       "".into(),
            style_prefix:      StyleConfig::default(),
            style_suffix:      StyleConfig::default(),
            style_description: StyleConfig {
                italic: true,
                ..StyleConfig::default()
            },
            style_content:     StyleConfig::default(),
        }
    }
}

fn labelled(description: &str, color: crossterm::style::Color) -> OutputConfig {
    OutputConfig {
        description: description.into(),
        style_content: StyleConfig {
            color,
            ..StyleConfig::default()
        },
        ..OutputConfig::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url:        String,
    pub app_name:            String,
    pub app_version:         String,
    pub contact:             String,
    pub timeout_secs:        u64,
    pub locale:              Locale,
    pub database_location:   PathBuf,
    pub server_address:      String,
    pub log_level:           String,
    pub output_id:           OutputConfig,
    pub output_title:        OutputConfig,
    pub output_author:       OutputConfig,
    pub output_publisher:    OutputConfig,
    pub output_release_date: OutputConfig,
    pub output_page_count:   OutputConfig,
    pub output_isbn:         OutputConfig,
    pub output_language:     OutputConfig,
    pub output_series:       OutputConfig,
    pub output_summary:      OutputConfig,
    pub output_cover:        OutputConfig,
    pub output_work:         OutputConfig,
    pub output_error:        OutputConfig,
}

impl Config {
    pub fn default_as_string() -> anyhow::Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    pub fn read_config() -> Result<Self> {
        Self::figment().extract().map_err(Into::into)
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Identifies us to Open Library on every request.
    pub fn user_agent(&self) -> String {
        format!("{}/{} ({})", self.app_name, self.app_version, self.contact)
    }

    /// `database_location` with `~` and environment variables expanded.
    pub fn database_path(&self) -> anyhow::Result<PathBuf> {
        Ok(shellexpand::path::full(&self.database_location)?.into_owned())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url:        "https://openlibrary.org".into(),
            app_name:            env!("CARGO_PKG_NAME").into(),
            app_version:         env!("CARGO_PKG_VERSION").into(),
            contact:             "bookmeta@example.org".into(),
            timeout_secs:        30,
            locale:              Locale::default(),
            database_location:   PathBuf::from("~/.local/share/bookmeta/books.db"),
            server_address:      "127.0.0.1:3000".into(),
            log_level:           "info".into(),
            output_id:           OutputConfig {
                prefix: "(".into(),
                suffix: ")".into(),
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_title:        OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_BOOK,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_author:       labelled("Written by:", COLOR_AUTHOR),
            output_publisher:    labelled("Publisher:", COLOR_PUBLISHER),
            output_release_date: labelled("Released:", COLOR_DATE),
            output_page_count:   labelled("Page count:", COLOR_PAGE_COUNT),
            output_isbn:         labelled("ISBN:", COLOR_WHITE),
            output_language:     labelled("Written in:", COLOR_LANGUAGE),
            output_series:       labelled("Series:", COLOR_SERIES),
            output_summary:      OutputConfig {
                prefix: "".into(),
                suffix: "".into(),
                ..OutputConfig::default()
            },
            output_cover:        labelled("Cover:", COLOR_DIMMED),
            output_work:         labelled("Work:", COLOR_DIMMED),
            output_error:        labelled("Error", COLOR_ERROR),
        }
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn user_agent_names_app_and_contact() {
        let config = Config {
            app_name: "bookmeta".into(),
            app_version: "1.2.3".into(),
            contact: "me@example.org".into(),
            ..Config::default()
        };
        assert_eq!(config.user_agent(), "bookmeta/1.2.3 (me@example.org)");
    }

    #[test]
    fn defaults_render_as_toml() {
        let rendered = Config::default_as_string().unwrap();
        assert!(rendered.contains("api_base_url = \"https://openlibrary.org\""));
    }

    #[test]
    fn file_and_env_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                api_base_url = "http://localhost:8080"

                [locale]
                name = "Français"
                url_key = "fre"
                code = "fr"
                "#,
            )?;
            jail.set_env("BOOKMETA_TIMEOUT_SECS", "5");

            let config = Config::read_config().unwrap();
            assert_eq!(config.api_base_url, "http://localhost:8080");
            assert_eq!(config.timeout_secs, 5);
            assert_eq!(config.locale.url_key, "fre");
            assert_eq!(config.server_address, "127.0.0.1:3000");
            Ok(())
        });
    }
}
