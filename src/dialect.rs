// SPDX-License-Identifier: Apache-2.0

use clap::ValueEnum;
use serde::Deserialize;

use crate::DataType;
use crate::util::range_fmt;

/// The flavor of HDL text produced when emitting a module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// SystemVerilog with `logic` nets and packed multi-dimensional arrays.
    #[default]
    SystemVerilog,

    /// Verilog-2001. Packed arrays are flattened into a single bus and words
    /// are selected with part-selects.
    Verilog,
}

impl Dialect {
    pub(crate) fn net_keyword(&self) -> &'static str {
        match self {
            Dialect::SystemVerilog => "logic",
            Dialect::Verilog => "wire",
        }
    }

    /// Formats the keyword, signedness and packed dimensions of a
    /// declaration, e.g. `logic signed [3:0][7:0]`.
    pub(crate) fn type_decl(&self, ty: &DataType) -> String {
        let mut decl = self.net_keyword().to_string();
        if ty.signed {
            decl.push_str(" signed");
        }
        decl.push(' ');
        match (self, ty.words) {
            (Dialect::SystemVerilog, Some(words)) => {
                decl.push_str(&range_fmt(words - 1, 0));
                decl.push_str(&range_fmt(ty.width - 1, 0));
            }
            _ => decl.push_str(&range_fmt(ty.bits() - 1, 0)),
        }
        decl
    }

    /// Formats a reference to word `index` of a signal of type `ty`.
    pub(crate) fn element_ref(&self, name: &str, ty: &DataType, index: usize) -> String {
        match self {
            Dialect::SystemVerilog => format!("{}[{}]", name, index),
            Dialect::Verilog => format!(
                "{}{}",
                name,
                range_fmt((index + 1) * ty.width - 1, index * ty.width)
            ),
        }
    }
}
