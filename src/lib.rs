// SPDX-License-Identifier: Apache-2.0

//! Generate structural Verilog for binary adder reduction trees.
//!
//! A tree sums `rows` signed words of `word_width` bits by wiring `log2(rows)`
//! layers of a parameterized two-operand adder, each layer one bit wider than
//! the last, so the `word_width + log2(rows)` bit result cannot overflow.
//!
//! ```
//! let text = adder_tree::generate(8, 4, "ripple_add", "summands", "sum").unwrap();
//! assert!(text.contains("output logic signed [9:0] sum"));
//! assert!(text.contains("assign sum = layer2out;"));
//! ```
//!
//! The tree is first built as a [`ModDef`], an ordered list of port, net,
//! instance and assignment records, and only then emitted as text in the
//! requested [`Dialect`].

mod adder;
pub mod config;
mod dialect;
mod error;
mod io;
mod mod_def;
mod mod_inst;
mod range;
mod stub;
mod tree;
mod usage;
mod util;
mod validate;

pub use adder::{LeafAdder, RippleAdder, check_contract};
pub use config::{MAX_WORD_WIDTH, TreeConfig};
pub use dialect::Dialect;
pub use error::{ConfigError, Error, NetlistError};
pub use io::{DataType, IO};
pub use mod_def::{Assignment, ModDef};
pub use mod_inst::{ModInst, SignalRef};
pub use range::SignedRange;
pub use stub::emit_adder_stub;
pub use tree::{Layer, TreeBuilder, TreeShape, generate, instance_name, layer_net_name};
pub use usage::Usage;
pub use util::is_identifier;
