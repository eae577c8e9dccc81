//! Syntactic classification of class members by their decorators.

pub const CLASSMETHOD: &str = "classmethod";
pub const STATICMETHOD: &str = "staticmethod";
pub const PROPERTY: &str = "property";
pub const SETTER: &str = "setter";
pub const GETTER: &str = "getter";

/// Shape of a decorator expression as written in source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decorator {
    /// `@name`
    Name(String),
    /// `@object.attribute`, only the trailing attribute matters
    Attribute { object: String, attribute: String },
    /// Calls and any other expression
    Other,
}

impl Decorator {
    pub fn name(name: impl Into<String>) -> Self {
        Decorator::Name(name.into())
    }

    pub fn attribute(object: impl Into<String>, attribute: impl Into<String>) -> Self {
        Decorator::Attribute {
            object: object.into(),
            attribute: attribute.into(),
        }
    }

    fn is_name(&self, expected: &str) -> bool {
        matches!(self, Decorator::Name(name) if name == expected)
    }

    fn has_trailing_attribute(&self, expected: &str) -> bool {
        matches!(self, Decorator::Attribute { attribute, .. } if attribute == expected)
    }
}

/// Category a class member is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberBucket {
    Attributes,
    Methods,
    Classmethods,
    Staticmethods,
    Properties,
    Setters,
    Getters,
}

impl MemberBucket {
    /// Order in which bucket members are attached under their class
    pub const INSERTION_ORDER: [MemberBucket; 7] = [
        MemberBucket::Attributes,
        MemberBucket::Methods,
        MemberBucket::Classmethods,
        MemberBucket::Staticmethods,
        MemberBucket::Properties,
        MemberBucket::Setters,
        MemberBucket::Getters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberBucket::Attributes => "attributes",
            MemberBucket::Methods => "methods",
            MemberBucket::Classmethods => "classmethods",
            MemberBucket::Staticmethods => "staticmethods",
            MemberBucket::Properties => "properties",
            MemberBucket::Setters => "setters",
            MemberBucket::Getters => "getters",
        }
    }
}

/// Buckets a method belongs to, given its decorator list.
///
/// Exactly one of methods, classmethods, staticmethods or properties comes
/// first. Setters and getters are detected independently and may follow,
/// so a plain method decorated with `@x.setter` is both a method and a
/// setter.
pub fn classify_method(decorators: &[Decorator]) -> Vec<MemberBucket> {
    let has_name = |name: &str| decorators.iter().any(|d| d.is_name(name));
    let has_attribute = |attr: &str| decorators.iter().any(|d| d.has_trailing_attribute(attr));

    let primary = if has_name(CLASSMETHOD) {
        MemberBucket::Classmethods
    } else if has_name(STATICMETHOD) {
        MemberBucket::Staticmethods
    } else if has_name(PROPERTY) {
        MemberBucket::Properties
    } else {
        MemberBucket::Methods
    };

    let mut buckets = vec![primary];
    if has_attribute(SETTER) {
        buckets.push(MemberBucket::Setters);
    }
    if has_attribute(GETTER) {
        buckets.push(MemberBucket::Getters);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undecorated_is_method() {
        assert_eq!(classify_method(&[]), vec![MemberBucket::Methods]);
    }

    #[test]
    fn test_special_names() {
        assert_eq!(
            classify_method(&[Decorator::name("classmethod")]),
            vec![MemberBucket::Classmethods]
        );
        assert_eq!(
            classify_method(&[Decorator::name("staticmethod")]),
            vec![MemberBucket::Staticmethods]
        );
        assert_eq!(
            classify_method(&[Decorator::name("property")]),
            vec![MemberBucket::Properties]
        );
    }

    #[test]
    fn test_unknown_name_is_method() {
        assert_eq!(
            classify_method(&[Decorator::name("cached"), Decorator::Other]),
            vec![MemberBucket::Methods]
        );
    }

    #[test]
    fn test_setter_overlaps_with_methods() {
        assert_eq!(
            classify_method(&[Decorator::attribute("value", "setter")]),
            vec![MemberBucket::Methods, MemberBucket::Setters]
        );
    }

    #[test]
    fn test_getter_overlaps_with_methods() {
        assert_eq!(
            classify_method(&[Decorator::attribute("value", "getter")]),
            vec![MemberBucket::Methods, MemberBucket::Getters]
        );
    }

    #[test]
    fn test_dotted_special_name_is_not_special() {
        // `@builtins.property` is an attribute, not the plain name
        assert_eq!(
            classify_method(&[Decorator::attribute("builtins", "property")]),
            vec![MemberBucket::Methods]
        );
    }

    #[test]
    fn test_primary_bucket_priority() {
        assert_eq!(
            classify_method(&[Decorator::name("property"), Decorator::name("classmethod")]),
            vec![MemberBucket::Classmethods]
        );
        assert_eq!(
            classify_method(&[Decorator::name("property"), Decorator::name("staticmethod")]),
            vec![MemberBucket::Staticmethods]
        );
    }

    #[test]
    fn test_insertion_order() {
        let names: Vec<_> = MemberBucket::INSERTION_ORDER
            .iter()
            .map(|b| b.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "attributes",
                "methods",
                "classmethods",
                "staticmethods",
                "properties",
                "setters",
                "getters"
            ]
        );
    }
}
