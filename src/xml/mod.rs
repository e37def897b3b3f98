//! Namespace-aware XML reading into a generic element tree
//!
//! The model builder never looks at raw XML events; it works on the
//! [`Element`] tree produced here. Element and attribute names carry their
//! resolved namespace URI, so `ar:AUTOSAR` and a default-namespace `AUTOSAR`
//! compare equal when both prefixes are bound to the same schema.

mod element;
mod reader;

pub use element::{Attribute, Descendants, Element, QName};
pub use reader::{decode_input, parse_document};
