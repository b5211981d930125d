//! Inline macros (`[[Name(args)]]`).
//!
//! Unknown macros and macros with unusable arguments are consumed without output.

use super::span::Emission;
use super::MarkupLanguage;
use crate::attributes::Attributes;
use once_cell::sync::Lazy;
use regex::Regex;

static SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)(px|%)?$").unwrap());
static KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+$").unwrap());

const ALIGNMENTS: &[&str] = &["left", "right", "top", "bottom", "middle"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Macro {
    /// `[[BR]]`
    LineBreak,
    /// `[[Image(src, options...)]]`
    Image,
}

impl Macro {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Macro::LineBreak => "BR",
            Macro::Image => "Image",
        }
    }

    fn expand(self, args: &MacroArguments<'_>) -> Option<Emission> {
        match self {
            Macro::LineBreak => Some(Emission::LineBreak),
            Macro::Image => image(args),
        }
    }
}

/// Expand the macro call `name(args)` for `language`.
pub(crate) fn expand(language: &MarkupLanguage, name: &str, args: Option<&str>) -> Emission {
    let Some(found) = language.find_macro(name) else {
        log::debug!("dropping unknown macro [[{name}]]");
        return Emission::Nothing;
    };
    let arguments = MacroArguments::parse(args.unwrap_or(""));
    found.expand(&arguments).unwrap_or_else(|| {
        log::debug!("dropping [[{name}]] with unusable arguments {args:?}");
        Emission::Nothing
    })
}

/// Comma separated macro arguments, split into positional and `key=value` ones.
#[derive(Debug, Default, PartialEq, Eq)]
struct MacroArguments<'a> {
    positional: Vec<&'a str>,
    keyed: Vec<(&'a str, &'a str)>,
}

impl<'a> MacroArguments<'a> {
    fn parse(raw: &'a str) -> Self {
        let mut arguments = Self::default();
        for arg in raw.split(',').map(str::trim).filter(|arg| !arg.is_empty()) {
            match arg.split_once('=') {
                Some((key, value)) if KEY.is_match(key.trim()) => {
                    arguments.keyed.push((key.trim(), value.trim()))
                }
                _ => arguments.positional.push(arg),
            }
        }
        arguments
    }
}

fn image(args: &MacroArguments<'_>) -> Option<Emission> {
    let (src, options) = args.positional.split_first()?;
    let attributes = image_options(options, &args.keyed).unwrap_or_else(|| {
        log::debug!("ignoring invalid options for image {src}");
        Attributes {
            border: Some("0".to_string()),
            ..Attributes::default()
        }
    });
    Some(Emission::Image {
        url: src.to_string(),
        attributes,
    })
}

/// Image attributes, or `None` when any option is invalid.
fn image_options(positional: &[&str], keyed: &[(&str, &str)]) -> Option<Attributes> {
    let mut attributes = Attributes {
        border: Some("0".to_string()),
        ..Attributes::default()
    };
    for value in positional {
        if let Some(size) = size(value) {
            attributes.width = Some(size);
        } else if ALIGNMENTS.contains(value) {
            attributes.align = Some(value.to_string());
        } else {
            return None;
        }
    }
    for (key, value) in keyed {
        match *key {
            "alt" => attributes.alt = Some(value.to_string()),
            "title" => attributes.title = Some(value.to_string()),
            "border" => {
                if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                attributes.border = Some(value.to_string());
            }
            "width" => attributes.width = Some(size(value)?),
            "height" => attributes.height = Some(size(value)?),
            "align" if ALIGNMENTS.contains(value) => attributes.align = Some(value.to_string()),
            _ => return None,
        }
    }
    Some(attributes)
}

/// `120`, `120px` or `50%`; pixel sizes lose their unit.
fn size(value: &str) -> Option<String> {
    let caps = SIZE.captures(value)?;
    match caps.get(2).map(|unit| unit.as_str()) {
        Some("%") => Some(format!("{}%", &caps[1])),
        _ => Some(caps[1].to_string()),
    }
}
