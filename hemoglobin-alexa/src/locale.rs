//! Localized response strings and SSML helpers.

use std::sync::LazyLock;

use regex::Regex;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\d+)\}").unwrap());

static SSML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[^>]+(>|$)").unwrap());

/// Resource bundle for one locale.
#[derive(Debug)]
pub struct LanguageStrings {
    pub locale: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

static EN_US: LanguageStrings = LanguageStrings {
    locale: "en-US",
    entries: &[
        ("SKILL_NAME", "Blood Analyzer"),
        (
            "LAUNCH_MESSAGE",
            "Welcome to Blood Analyzer. I know what all this metrics mean. Ask me something.",
        ),
        (
            "HELP_MESSAGE",
            "For example, ask What is the lower limit of hemoglobin for adult",
        ),
        ("STOP_MESSAGE", "Would you like to stop?"),
        ("CANCEL_MESSAGE", "Ok, let's interact again soon."),
        (
            "HELP_UNHANDLED",
            "For example, ask What is the lower limit of hemoglobin for adult",
        ),
        (
            "HEMOGLOBIN_LIMIT_MESSAGE",
            "The {0} is {1} gram per litre for {2} of this age.",
        ),
        (
            "HEMOGLOBIN_RANGE_MESSAGE",
            "The normal level is between {0} and {1} gram per litre for {2} of this age.",
        ),
        ("HEMOGLOBIN_ERROR_MESSAGE", "Please refine your question."),
    ],
};

static BUNDLES: [&LanguageStrings; 1] = [&EN_US];

/// Bundle for `locale`, then for `fallback`, then en-US.
pub fn language_strings(locale: &str, fallback: &str) -> &'static LanguageStrings {
    find_bundle(locale)
        .or_else(|| find_bundle(fallback))
        .unwrap_or(&EN_US)
}

fn find_bundle(locale: &str) -> Option<&'static LanguageStrings> {
    BUNDLES
        .iter()
        .copied()
        .find(|bundle| bundle.locale.eq_ignore_ascii_case(locale))
}

impl LanguageStrings {
    pub fn template(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, template)| *template)
    }

    /// Render `key` with positional `{n}` parameters. Unknown keys render as the key itself.
    pub fn translate<S: AsRef<str>>(&self, key: &str, params: &[S]) -> String {
        let Some(template) = self.template(key) else {
            return key.to_string();
        };

        PLACEHOLDER
            .replace_all(template, |caps: &regex::Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| params.get(index))
                    .map(|param| param.as_ref().to_string())
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

/// Remove SSML tags, including an unterminated trailing tag.
pub fn strip_ssml(text: &str) -> String {
    SSML_TAG.replace_all(text, "").into_owned()
}
