//! Alert kinds and text templates.

use handlebars::{Handlebars, Template};
use serde::Serialize;

use super::AlertError;
use crate::probe::IpFamily;

/// Built-in alert templates.
///
/// Texts use Telegram's HTML parse mode.
pub mod defaults {
    /// Sent once the first address is known.
    pub const STARTED: &str = "🚀 Service started\nCurrent {{family}}: <code>{{address}}</code>";

    /// Sent when the address differs from the previous check.
    pub const CHANGED: &str =
        "📢 {{family}} address changed\nOld: <code>{{previous}}</code>\nNew: <code>{{current}}</code>";

    /// Sent when monitoring stops.
    pub const STOPPED: &str = "🛑 Service stopped";
}

/// An event worth telling the operator about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert<'a> {
    /// Monitoring is live and the current address is known.
    Started {
        /// Current address
        address: &'a str,
    },
    /// The address changed between two checks.
    Changed {
        /// Address seen at the previous check
        previous: &'a str,
        /// Address seen now
        current: &'a str,
    },
    /// Monitoring is stopping.
    Stopped,
}

impl Alert<'_> {
    /// Short name used in log lines.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Started { .. } => "started",
            Self::Changed { .. } => "changed",
            Self::Stopped => "stopped",
        }
    }
}

/// Variables available to every template.
#[derive(Serialize)]
struct AlertData<'a> {
    family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current: Option<&'a str>,
}

/// Handlebars templates for the three alert kinds.
///
/// Interpolated values are HTML-escaped, which is what the HTML parse mode
/// expects. Template syntax is checked once, at construction.
///
/// # Variables
///
/// - `family`: "IPv4" or "IPv6" (all templates)
/// - `address`: current address (started)
/// - `previous`, `current`: old and new address (changed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertTemplates {
    started: String,
    changed: String,
    stopped: String,
}

impl Default for AlertTemplates {
    fn default() -> Self {
        Self {
            started: defaults::STARTED.to_string(),
            changed: defaults::CHANGED.to_string(),
            stopped: defaults::STOPPED.to_string(),
        }
    }
}

impl AlertTemplates {
    /// Creates templates from custom texts.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Render`] naming the first template that fails to
    /// compile.
    pub fn new(
        started: impl Into<String>,
        changed: impl Into<String>,
        stopped: impl Into<String>,
    ) -> Result<Self, AlertError> {
        let templates = Self {
            started: started.into(),
            changed: changed.into(),
            stopped: stopped.into(),
        };

        for (name, source) in [
            ("started", &templates.started),
            ("changed", &templates.changed),
            ("stopped", &templates.stopped),
        ] {
            Template::compile(source)
                .map_err(|e| AlertError::Render(format!("{name} template: {e}")))?;
        }

        Ok(templates)
    }

    /// Renders the text for `alert`.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Render`] if rendering fails.
    pub fn render(&self, alert: &Alert<'_>, family: IpFamily) -> Result<String, AlertError> {
        let mut data = AlertData {
            family: family.to_string(),
            address: None,
            previous: None,
            current: None,
        };

        let template = match *alert {
            Alert::Started { address } => {
                data.address = Some(address);
                &self.started
            }
            Alert::Changed { previous, current } => {
                data.previous = Some(previous);
                data.current = Some(current);
                &self.changed
            }
            Alert::Stopped => &self.stopped,
        };

        Handlebars::new()
            .render_template(template, &data)
            .map_err(|e| AlertError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod builtin {
        use super::*;

        #[test]
        fn builtin_templates_compile() {
            assert!(
                AlertTemplates::new(defaults::STARTED, defaults::CHANGED, defaults::STOPPED)
                    .is_ok()
            );
        }

        #[test]
        fn started_contains_address() {
            let text = AlertTemplates::default()
                .render(
                    &Alert::Started {
                        address: "2001:db8::1",
                    },
                    IpFamily::V6,
                )
                .unwrap();

            assert_eq!(
                text,
                "🚀 Service started\nCurrent IPv6: <code>2001:db8::1</code>"
            );
        }

        #[test]
        fn changed_contains_both_addresses() {
            let text = AlertTemplates::default()
                .render(
                    &Alert::Changed {
                        previous: "2001:db8::1",
                        current: "2001:db8::2",
                    },
                    IpFamily::V6,
                )
                .unwrap();

            assert_eq!(
                text,
                "📢 IPv6 address changed\nOld: <code>2001:db8::1</code>\nNew: <code>2001:db8::2</code>"
            );
        }

        #[test]
        fn stopped_is_fixed_text() {
            let text = AlertTemplates::default()
                .render(&Alert::Stopped, IpFamily::V4)
                .unwrap();

            assert_eq!(text, "🛑 Service stopped");
        }

        #[test]
        fn family_follows_argument() {
            let text = AlertTemplates::default()
                .render(
                    &Alert::Started {
                        address: "192.0.2.1",
                    },
                    IpFamily::V4,
                )
                .unwrap();

            assert!(text.contains("Current IPv4"));
        }
    }

    mod custom {
        use super::*;

        #[test]
        fn custom_texts_are_used() {
            let templates =
                AlertTemplates::new("up {{address}}", "{{previous}} -> {{current}}", "down")
                    .unwrap();

            let text = templates
                .render(
                    &Alert::Changed {
                        previous: "a",
                        current: "b",
                    },
                    IpFamily::V6,
                )
                .unwrap();

            assert_eq!(text, "a -> b");
        }

        #[test]
        fn values_are_html_escaped() {
            let templates = AlertTemplates::new("{{address}}", "x", "y").unwrap();

            let text = templates
                .render(
                    &Alert::Started {
                        address: "<script>",
                    },
                    IpFamily::V6,
                )
                .unwrap();

            assert_eq!(text, "&lt;script&gt;");
        }

        #[test]
        fn invalid_syntax_names_template() {
            let error = AlertTemplates::new("ok", "{{#if current}}unclosed", "ok").unwrap_err();

            assert!(matches!(error, AlertError::Render(ref msg) if msg.starts_with("changed")));
        }

        #[test]
        fn unknown_variable_renders_empty() {
            let templates = AlertTemplates::new("[{{nope}}]", "x", "y").unwrap();

            let text = templates
                .render(&Alert::Started { address: "a" }, IpFamily::V6)
                .unwrap();

            assert_eq!(text, "[]");
        }
    }
}
