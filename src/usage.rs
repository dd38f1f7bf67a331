// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

/// Represents how the leaf adder module should be treated when emitting
/// Verilog for a tree.
#[derive(PartialEq, Eq, Default, Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Usage {
    /// Do not emit anything for the leaf adder; its definition is expected to
    /// come from elsewhere in the source list.
    #[default]
    EmitNothing,

    /// Emit a stub (interface only) of the leaf adder ahead of the tree.
    EmitStub,
}
