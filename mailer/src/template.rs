//! `{{token}}` substitution for HTML email templates.

/// An HTML template and the placeholder tokens it declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Template name, used in logs.
    pub name: &'static str,
    /// Raw HTML containing `{{token}}` placeholders.
    pub html: &'static str,
    /// Tokens this template substitutes.
    pub tokens: &'static [&'static str],
}

impl Template {
    /// Fill the template's declared tokens.
    ///
    /// Every occurrence of a declared `{{token}}` is replaced by its value.
    /// Values are inserted verbatim and never re-scanned, so a value that
    /// itself contains `{{...}}` is left alone. Placeholders that are not
    /// declared, or declared but missing from `values`, stay as written.
    ///
    /// # Examples
    ///
    /// ```
    /// use signalist_mailer::template::Template;
    ///
    /// const GREETING: Template = Template {
    ///     name: "greeting",
    ///     html: "<p>Hi {{name}}! Bye {{name}}. {{other}}</p>",
    ///     tokens: &["name"],
    /// };
    ///
    /// let html = GREETING.render(&[("name", "Ada"), ("other", "ignored")]);
    /// assert_eq!(html, "<p>Hi Ada! Bye Ada. {{other}}</p>");
    /// ```
    #[must_use]
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        render(self.html, |token| {
            if !self.tokens.contains(&token) {
                return None;
            }
            values
                .iter()
                .find(|(key, _)| *key == token)
                .map(|(_, value)| *value)
        })
    }
}

/// Single left-to-right pass over `template`, asking `lookup` for each
/// `{{token}}` it meets.
fn render<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let token = &after_open[..end];
        match lookup(token) {
            Some(value) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(token);
                out.push_str("}}");
            },
        }
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use proptest::prelude::*;

    const SAMPLE: Template = Template {
        name: "sample",
        html: "<a href=\"{{url}}\">{{url}}</a> {{name}} {{url",
        tokens: &["url", "name"],
    };

    #[test]
    fn replaces_every_occurrence() {
        let html = SAMPLE.render(&[("url", "https://x.test"), ("name", "Ada")]);
        assert_eq!(
            html,
            "<a href=\"https://x.test\">https://x.test</a> Ada {{url"
        );
    }

    #[test]
    fn missing_values_leave_placeholder() {
        let html = SAMPLE.render(&[("url", "u")]);
        assert_eq!(html, "<a href=\"u\">u</a> {{name}} {{url");
    }

    #[test]
    fn values_are_not_rescanned() {
        let html = SAMPLE.render(&[("url", "{{name}}"), ("name", "Ada")]);
        assert!(html.starts_with("<a href=\"{{name}}\">{{name}}</a> Ada"));
    }

    #[test]
    fn shipped_templates_declare_every_placeholder_they_use() {
        for template in templates::ALL {
            let values: Vec<(&str, &str)> =
                template.tokens.iter().map(|t| (*t, "value")).collect();
            let html = template.render(&values);
            for token in template.tokens {
                assert!(
                    !html.contains(&format!("{{{{{token}}}}}")),
                    "{} left {{{{{token}}}}} behind",
                    template.name
                );
            }
            assert!(!html.contains("{{"), "{} has undeclared placeholders", template.name);
        }
    }

    proptest! {
        #[test]
        fn rendering_is_deterministic_and_complete(
            name in "[^{}]{0,40}",
            intro in "[^{}]{0,200}",
        ) {
            let values = [("name", name.as_str()), ("intro", intro.as_str())];
            let first = templates::WELCOME.render(&values);
            let second = templates::WELCOME.render(&values);

            prop_assert_eq!(&first, &second);
            prop_assert!(!first.contains("{{name}}"));
            prop_assert!(!first.contains("{{intro}}"));
            prop_assert!(first.contains(name.as_str()));
            prop_assert!(first.contains(intro.as_str()));
        }

        #[test]
        fn stock_alert_substitutes_all_tokens(
            symbol in "[A-Z]{1,5}",
            price in "[0-9]{1,4}\\.[0-9]{2}",
        ) {
            let html = templates::STOCK_ALERT_UPPER.render(&[
                ("symbol", symbol.as_str()),
                ("company", "Acme"),
                ("currentPrice", price.as_str()),
                ("targetPrice", "100.00"),
                ("timestamp", "2025-01-01 09:30"),
            ]);
            prop_assert!(!html.contains("{{"));
            prop_assert!(html.contains(symbol.as_str()));
        }
    }
}
