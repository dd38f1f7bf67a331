// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::util::is_identifier;
use crate::{DataType, IO};

/// Interface of the parameterized two-operand adder that a tree instantiates.
///
/// The adder is treated as an opaque module: only its name, its width
/// parameter and its ports are known. Operands are signed and `WIDTH` bits
/// wide; the result must be exactly one bit wider so that the sum of any two
/// operands fits.
pub trait LeafAdder {
    /// Name of the Verilog module to instantiate.
    fn module_name(&self) -> &str;

    fn width_parameter(&self) -> &str {
        "WIDTH"
    }

    fn operand_ports(&self) -> (&str, &str) {
        ("a", "b")
    }

    fn result_port(&self) -> &str {
        "s"
    }

    /// Width of the result port when the width parameter is `operand_width`.
    fn result_width(&self, operand_width: usize) -> usize {
        operand_width + 1
    }

    /// Returns the ports of an instance whose width parameter is
    /// `operand_width`, in declaration order.
    fn ports(&self, operand_width: usize) -> IndexMap<String, IO> {
        let (a, b) = self.operand_ports();
        let mut ports = IndexMap::new();
        ports.insert(a.to_string(), IO::Input(DataType::signed(operand_width)));
        ports.insert(b.to_string(), IO::Input(DataType::signed(operand_width)));
        ports.insert(
            self.result_port().to_string(),
            IO::Output(DataType::signed(self.result_width(operand_width))),
        );
        ports
    }
}

/// The default leaf adder: a purely combinational ripple-carry adder with
/// ports `a`, `b` and `s`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RippleAdder {
    name: String,
}

impl RippleAdder {
    pub fn new(name: impl AsRef<str>) -> Self {
        RippleAdder {
            name: name.as_ref().to_string(),
        }
    }
}

impl Default for RippleAdder {
    fn default() -> Self {
        RippleAdder::new(crate::config::DEFAULT_ADDER_NAME)
    }
}

impl LeafAdder for RippleAdder {
    fn module_name(&self) -> &str {
        &self.name
    }
}

/// Checks that `adder` has a legal width parameter and three distinct legal
/// port names, and that it widens its result by exactly one bit for every
/// operand width in `operand_widths`.
pub fn check_contract<A: LeafAdder + ?Sized>(
    adder: &A,
    operand_widths: impl IntoIterator<Item = usize>,
) -> Result<(), ConfigError> {
    let (a, b) = adder.operand_ports();
    let result = adder.result_port();
    for (field, name) in [
        ("width_parameter", adder.width_parameter()),
        ("operand_port", a),
        ("operand_port", b),
        ("result_port", result),
    ] {
        if !is_identifier(name) {
            return Err(ConfigError::InvalidIdentifier {
                field,
                name: name.to_string(),
            });
        }
    }
    if a == b || a == result {
        return Err(ConfigError::NameCollision(a.to_string()));
    }
    if b == result {
        return Err(ConfigError::NameCollision(b.to_string()));
    }

    for operand_width in operand_widths {
        let result_width = adder.result_width(operand_width);
        if result_width != operand_width + 1 {
            return Err(ConfigError::AdderContract {
                adder: adder.module_name().to_string(),
                operand_width,
                result_width,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Truncating;

    impl LeafAdder for Truncating {
        fn module_name(&self) -> &str {
            "trunc_add"
        }

        fn result_width(&self, operand_width: usize) -> usize {
            operand_width
        }
    }

    struct Ports(&'static str, &'static str, &'static str);

    impl LeafAdder for Ports {
        fn module_name(&self) -> &str {
            "odd_add"
        }

        fn operand_ports(&self) -> (&str, &str) {
            (self.0, self.1)
        }

        fn result_port(&self) -> &str {
            self.2
        }
    }

    #[test]
    fn ripple_adder_ports() {
        let adder = RippleAdder::default();
        let ports = adder.ports(8);
        let names: Vec<&str> = ports.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, ["a", "b", "s"]);
        assert_eq!(ports["a"], IO::Input(DataType::signed(8)));
        assert_eq!(ports["s"], IO::Output(DataType::signed(9)));
        assert_eq!(adder.module_name(), "ripple_add");
    }

    #[test]
    fn contract_holds_for_ripple_adder() {
        assert!(check_contract(&RippleAdder::default(), 1..64).is_ok());
    }

    #[test]
    fn contract_rejects_truncating_adder() {
        let err = check_contract(&Truncating, [8, 9]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::AdderContract {
                operand_width: 8,
                result_width: 8,
                ..
            }
        ));
    }

    #[test]
    fn contract_rejects_duplicate_ports() {
        for (a, b, s, dup) in [("a", "a", "s", "a"), ("a", "b", "a", "a"), ("a", "s", "s", "s")] {
            let err = check_contract(&Ports(a, b, s), [8]).unwrap_err();
            assert!(matches!(err, ConfigError::NameCollision(name) if name == dup));
        }
    }

    #[test]
    fn contract_rejects_illegal_port_names() {
        let err = check_contract(&Ports("a", "b", "out put"), [8]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidIdentifier {
                field: "result_port",
                ..
            }
        ));
        let err = check_contract(&Ports("int", "b", "s"), [8]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidIdentifier {
                field: "operand_port",
                ..
            }
        ));
    }
}
