//! Interpolated variable references.
//!
//! The parser leaves `${...}` references as raw text. [`Reference::parse`]
//! classifies that text by prefix:
//!
//! ```text
//! count.index            Count
//! path.module            Path
//! self.private_ip        SelfRef
//! terraform.workspace    Terraform
//! var.region[.elem]      User
//! module.vpc.id          Module
//! local.prefix           Local
//! data.aws_ami.ubuntu.id Resource (data)
//! foo                    Simple
//! aws_instance.web.id    Resource (managed)
//! ```
//!
//! Resource fields may start with `*` (splat over every instance) or an
//! instance number; either marks the reference as multi and is dropped from
//! the field. Instance numbers take an optional sign and a `0x`, `0o`, `0b`
//! or leading `0` radix prefix; `-1` selects every instance, like `*`.

use std::fmt;

/// A reference that does not have the shape its prefix requires.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("`{0}`: module references must have the form module.NAME.OUTPUT")]
    Module(String),
    #[error("`{0}`: local references must have the form local.NAME; use index syntax for attributes")]
    Local(String),
    #[error("`{0}`: resource references must have the form TYPE.NAME.ATTRIBUTE")]
    Resource(String),
    #[error("`{0}`: data references must have the form data.TYPE.NAME.ATTRIBUTE")]
    DataResource(String),
}

/// Attributes of `count.`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum CountAttribute {
    Index,
    Other(String),
}

/// Attributes of `path.`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum PathAttribute {
    Cwd,
    Module,
    Root,
    Other(String),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ResourceMode {
    Managed,
    Data,
}

/// `TYPE.NAME[.INDEX|.*].FIELD` or `data.TYPE.NAME[.INDEX|.*].FIELD`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ResourceReference {
    pub mode: ResourceMode,
    pub type_name: String,
    pub name: String,
    /// Accessed attribute path, instance selector removed.
    pub field: String,
    /// Whether an instance selector (`*` or a number) was present.
    pub multi: bool,
    /// The selected instance, `None` for a splat or a single reference.
    pub index: Option<i64>,
}

impl ResourceReference {
    /// Key of the referenced resource in the graph's resource table.
    pub fn resource_id(&self) -> String {
        match self.mode {
            ResourceMode::Managed => format!("{}.{}", self.type_name, self.name),
            ResourceMode::Data => format!("data.{}.{}", self.type_name, self.name),
        }
    }

    /// Whether this refers to every instance of a counted resource.
    pub fn is_splat(&self) -> bool {
        self.multi && self.index.is_none()
    }

    /// The dotted attribute path, split into elements.
    pub fn field_elements(&self) -> impl Iterator<Item = &str> {
        self.field.split('.')
    }
}

/// A classified variable reference.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Reference {
    Count(CountAttribute),
    Local { name: String },
    Module { name: String, field: String },
    Path(PathAttribute),
    Resource(ResourceReference),
    SelfRef { field: String },
    Simple { name: String },
    Terraform { attribute: String },
    User { name: String, element: Option<String> },
}

impl Reference {
    /// Classify raw reference text.
    pub fn parse(text: &str) -> Result<Reference, ReferenceError> {
        if let Some(attr) = text.strip_prefix("count.") {
            let attr = match attr {
                "index" => CountAttribute::Index,
                other => CountAttribute::Other(other.to_owned()),
            };
            return Ok(Reference::Count(attr));
        }
        if let Some(attr) = text.strip_prefix("path.") {
            let attr = match attr {
                "cwd" => PathAttribute::Cwd,
                "module" => PathAttribute::Module,
                "root" => PathAttribute::Root,
                other => PathAttribute::Other(other.to_owned()),
            };
            return Ok(Reference::Path(attr));
        }
        if let Some(field) = text.strip_prefix("self.") {
            return Ok(Reference::SelfRef {
                field: field.to_owned(),
            });
        }
        if let Some(attribute) = text.strip_prefix("terraform.") {
            return Ok(Reference::Terraform {
                attribute: attribute.to_owned(),
            });
        }
        if let Some(rest) = text.strip_prefix("var.") {
            let (name, element) = match rest.split_once('.') {
                Some((name, element)) => (name, Some(element.to_owned())),
                None => (rest, None),
            };
            return Ok(Reference::User {
                name: name.to_owned(),
                element,
            });
        }
        if let Some(rest) = text.strip_prefix("module.") {
            let Some((name, field)) = rest.split_once('.') else {
                return Err(ReferenceError::Module(text.to_owned()));
            };
            return Ok(Reference::Module {
                name: name.to_owned(),
                field: field.to_owned(),
            });
        }
        if let Some(name) = text.strip_prefix("local.") {
            if name.contains('.') {
                return Err(ReferenceError::Local(text.to_owned()));
            }
            return Ok(Reference::Local {
                name: name.to_owned(),
            });
        }
        if let Some(rest) = text.strip_prefix("data.") {
            let mut parts = rest.splitn(3, '.');
            let (Some(type_name), Some(name), Some(field)) =
                (parts.next(), parts.next(), parts.next())
            else {
                return Err(ReferenceError::DataResource(text.to_owned()));
            };
            return Ok(Reference::Resource(resource_reference(
                ResourceMode::Data,
                type_name,
                name,
                field,
            )));
        }
        if !text.contains('.') {
            return Ok(Reference::Simple {
                name: text.to_owned(),
            });
        }

        let mut parts = text.splitn(3, '.');
        let (Some(type_name), Some(name), Some(field)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ReferenceError::Resource(text.to_owned()));
        };
        Ok(Reference::Resource(resource_reference(
            ResourceMode::Managed,
            type_name,
            name,
            field,
        )))
    }

    /// Short name of the reference kind, for messages and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Reference::Count(_) => "count",
            Reference::Local { .. } => "local",
            Reference::Module { .. } => "module",
            Reference::Path(_) => "path",
            Reference::Resource(_) => "resource",
            Reference::SelfRef { .. } => "self",
            Reference::Simple { .. } => "simple",
            Reference::Terraform { .. } => "terraform",
            Reference::User { .. } => "user",
        }
    }
}

fn resource_reference(mode: ResourceMode, type_name: &str, name: &str, field: &str) -> ResourceReference {
    let mut multi = false;
    let mut index = None;
    let mut field = field;

    if let Some((selector, rest)) = field.split_once('.') {
        if selector == "*" {
            multi = true;
        } else if let Some(n) = parse_instance_index(selector) {
            multi = true;
            index = (n != -1).then_some(n);
        }
        if multi {
            field = rest;
        }
    }

    ResourceReference {
        mode,
        type_name: type_name.to_owned(),
        name: name.to_owned(),
        field: field.to_owned(),
        multi,
        index,
    }
}

/// An integer with an optional sign and radix prefix (`0x`, `0o`, `0b`, or a
/// leading `0` for octal). Underscores may separate digits only after a
/// prefix.
fn parse_instance_index(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let lower = unsigned.to_ascii_lowercase();
    let (radix, digits) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };

    if digits.contains('_') && (radix == 10 || digits.ends_with('_') || digits.contains("__")) {
        return None;
    }
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let magnitude = i128::from(u64::from_str_radix(&digits, radix).ok()?);
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Count(CountAttribute::Index) => f.write_str("count.index"),
            Reference::Count(CountAttribute::Other(attr)) => write!(f, "count.{attr}"),
            Reference::Local { name } => write!(f, "local.{name}"),
            Reference::Module { name, field } => write!(f, "module.{name}.{field}"),
            Reference::Path(attr) => match attr {
                PathAttribute::Cwd => f.write_str("path.cwd"),
                PathAttribute::Module => f.write_str("path.module"),
                PathAttribute::Root => f.write_str("path.root"),
                PathAttribute::Other(other) => write!(f, "path.{other}"),
            },
            Reference::Resource(r) => {
                write!(f, "{}", r.resource_id())?;
                match (r.multi, r.index) {
                    (true, Some(index)) => write!(f, ".{index}")?,
                    (true, None) => f.write_str(".*")?,
                    (false, _) => {}
                }
                write!(f, ".{}", r.field)
            }
            Reference::SelfRef { field } => write!(f, "self.{field}"),
            Reference::Simple { name } => f.write_str(name),
            Reference::Terraform { attribute } => write!(f, "terraform.{attribute}"),
            Reference::User { name, element } => match element {
                Some(element) => write!(f, "var.{name}.{element}"),
                None => write!(f, "var.{name}"),
            },
        }
    }
}
