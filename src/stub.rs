// SPDX-License-Identifier: Apache-2.0

use crate::{Dialect, LeafAdder};

/// Returns an interface-only definition of `adder`, with its width parameter
/// defaulting to `default_width`. The result port is declared one bit wider
/// than the operands, as the leaf adder contract requires.
pub fn emit_adder_stub<A: LeafAdder + ?Sized>(
    adder: &A,
    default_width: usize,
    dialect: Dialect,
) -> String {
    let param = adder.width_parameter();
    let (a, b) = adder.operand_ports();
    let (param_decl, net) = match dialect {
        Dialect::SystemVerilog => (format!("parameter int {param} = {default_width}"), "logic"),
        Dialect::Verilog => (format!("parameter {param} = {default_width}"), "wire"),
    };
    format!(
        "\
module {name} #(
  {param_decl}
) (
  input {net} signed [{param}-1:0] {a},
  input {net} signed [{param}-1:0] {b},
  output {net} signed [{param}:0] {s}
);
endmodule
",
        name = adder.module_name(),
        s = adder.result_port(),
    )
}
