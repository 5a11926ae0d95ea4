use std::fmt;

/// The handful of CSS selector shapes the page uses.
///
/// The browser host renders them with [`Selector::to_css`]; the memory
/// host matches them structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `tag`
    Tag(String),
    /// `.class`
    Class(String),
    /// `#id`
    Id(String),
    /// `tag[attribute]`
    WithAttribute {
        /// Element tag name.
        tag: String,
        /// Attribute that must be present.
        attribute: String,
    },
    /// `tag[attribute^="prefix"]`
    AttributePrefix {
        /// Element tag name.
        tag: String,
        /// Attribute to test.
        attribute: String,
        /// Required value prefix.
        prefix: String,
    },
    /// `a, b, c`
    AnyOf(Vec<Selector>),
}

impl Selector {
    /// `tag`
    #[must_use]
    pub fn tag(tag: &str) -> Self {
        Self::Tag(tag.into())
    }

    /// `.class`
    #[must_use]
    pub fn class(class: &str) -> Self {
        Self::Class(class.into())
    }

    /// `#id`
    #[must_use]
    pub fn id(id: &str) -> Self {
        Self::Id(id.into())
    }

    /// `tag[attribute]`
    #[must_use]
    pub fn with_attribute(tag: &str, attribute: &str) -> Self {
        Self::WithAttribute {
            tag: tag.into(),
            attribute: attribute.into(),
        }
    }

    /// `tag[attribute^="prefix"]`
    #[must_use]
    pub fn attribute_prefix(tag: &str, attribute: &str, prefix: &str) -> Self {
        Self::AttributePrefix {
            tag: tag.into(),
            attribute: attribute.into(),
            prefix: prefix.into(),
        }
    }

    /// Comma-joined alternatives of several classes.
    #[must_use]
    pub fn any_class(classes: &[&str]) -> Self {
        Self::AnyOf(classes.iter().map(|c| Self::class(c)).collect())
    }

    /// Id selector named by an in-page fragment link (`"#main"`).
    ///
    /// Returns `None` for anything that is not a non-empty fragment.
    #[must_use]
    pub fn from_fragment(href: &str) -> Option<Self> {
        href.strip_prefix('#')
            .filter(|id| !id.is_empty())
            .map(Self::id)
    }

    /// CSS selector text.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "{tag}"),
            Self::Class(class) => write!(f, ".{class}"),
            Self::Id(id) => write!(f, "#{id}"),
            Self::WithAttribute { tag, attribute } => {
                write!(f, "{tag}[{attribute}]")
            }
            Self::AttributePrefix {
                tag,
                attribute,
                prefix,
            } => write!(f, "{tag}[{attribute}^=\"{prefix}\"]"),
            Self::AnyOf(list) => {
                for (i, selector) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{selector}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_css() {
        assert_eq!(Selector::class("nav__link").to_css(), ".nav__link");
        assert_eq!(
            Selector::with_attribute("section", "id").to_css(),
            "section[id]"
        );
        assert_eq!(
            Selector::attribute_prefix("a", "href", "http").to_css(),
            "a[href^=\"http\"]"
        );
        assert_eq!(
            Selector::any_class(&["card", "publication-card"]).to_css(),
            ".card, .publication-card"
        );
    }

    #[test]
    fn fragment_links() {
        assert_eq!(
            Selector::from_fragment("#main"),
            Some(Selector::id("main"))
        );
        assert_eq!(Selector::from_fragment("#"), None);
        assert_eq!(Selector::from_fragment("main"), None);
    }
}
