// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM error type.

use alloc::string::String;

use thiserror::Error;

use crate::node::NodeId;

/// Errors raised by [`Document`](crate::Document) operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DomError {
    /// The node id does not belong to this document.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    /// A node cannot be appended below itself or one of its descendants.
    #[error("cannot append {child:?} below {parent:?}: would create a cycle")]
    Cycle {
        /// The prospective parent.
        parent: NodeId,
        /// The node being moved.
        child: NodeId,
    },
    /// A selector string could not be parsed.
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector {
        /// The offending selector.
        selector: String,
        /// What went wrong.
        reason: &'static str,
    },
    /// A custom element rejected a property write.
    #[error("<{tag}> rejected `{property}`: {message}")]
    Component {
        /// Tag name of the rejecting element.
        tag: String,
        /// The property that was written.
        property: String,
        /// The component's message.
        message: String,
    },
}
