// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;

use crate::error::NetlistError;
use crate::util::range_fmt;
use crate::validate::{DrivenBits, DrivenError, UsedBits};
use crate::{IO, ModDef, SignalRef};

impl ModDef {
    /// Validates this module definition. Validation checks that every
    /// referenced signal exists, that connection and assignment widths agree,
    /// that every bit of every output port and internal net is driven exactly
    /// once, that every bit of every input port and internal net is used, and
    /// that every instance port is connected.
    pub fn validate(&self) -> Result<(), NetlistError> {
        let mut driven_bits: IndexMap<&str, DrivenBits> = IndexMap::new();
        let mut used_bits: IndexMap<&str, UsedBits> = IndexMap::new();

        // Initialize ModDef ports
        for (port_name, io) in &self.ports {
            let bits = io.ty().bits();
            match io {
                IO::Input(_) => {
                    driven_bits.insert(port_name, DrivenBits::new_all_driven(bits));
                    used_bits.insert(port_name, UsedBits::new(bits));
                }
                IO::Output(_) => {
                    driven_bits.insert(port_name, DrivenBits::new(bits));
                }
            }
        }

        // Initialize internal nets
        for (net_name, ty) in &self.nets {
            driven_bits.insert(net_name, DrivenBits::new(ty.bits()));
            used_bits.insert(net_name, UsedBits::new(ty.bits()));
        }

        // Process instances
        for inst in self.instances.values() {
            let inst_path = format!("{}.{}", self.name, inst.name);

            if let Some(port_name) = inst
                .connections
                .keys()
                .find(|port_name| !inst.ports.contains_key(*port_name))
            {
                return Err(NetlistError::UnknownSignal {
                    module: inst_path,
                    signal: port_name.clone(),
                });
            }

            for (port_name, io) in &inst.ports {
                let port_path = format!("{}.{}", inst_path, port_name);
                let signal = inst
                    .connections
                    .get(port_name)
                    .ok_or_else(|| NetlistError::Unconnected(port_path.clone()))?;

                let (msb, lsb) = self.ref_bits(signal)?;
                let actual = msb - lsb + 1;
                let expected = io.ty().bits();
                if actual != expected {
                    return Err(NetlistError::WidthMismatch {
                        context: port_path,
                        expected,
                        actual,
                    });
                }

                match io {
                    IO::Input(_) => self.mark_used(&mut used_bits, signal, msb, lsb),
                    IO::Output(_) => self.mark_driven(&mut driven_bits, signal, msb, lsb)?,
                }
            }
        }

        // Process continuous assignments
        for assignment in &self.assignments {
            let (lhs_msb, lhs_lsb) = self.ref_bits(&assignment.lhs)?;
            let (rhs_msb, rhs_lsb) = self.ref_bits(&assignment.rhs)?;
            let expected = lhs_msb - lhs_lsb + 1;
            let actual = rhs_msb - rhs_lsb + 1;
            if expected != actual {
                return Err(NetlistError::WidthMismatch {
                    context: format!("{}: assign {}", self.name, assignment.lhs),
                    expected,
                    actual,
                });
            }
            self.mark_driven(&mut driven_bits, &assignment.lhs, lhs_msb, lhs_lsb)?;
            self.mark_used(&mut used_bits, &assignment.rhs, rhs_msb, rhs_lsb);
        }

        // Every output port and net must be driven
        for (name, bits) in &driven_bits {
            if let Some(problem) = bits.example_problematic_bits() {
                return Err(NetlistError::Undriven(format!(
                    "{}.{}{}",
                    self.name, name, problem
                )));
            }
            debug_assert!(bits.all_driven());
        }

        // Every input port and net must be used
        for (name, bits) in &used_bits {
            if let Some(problem) = bits.example_problematic_bits() {
                return Err(NetlistError::Unused(format!(
                    "{}.{}{}",
                    self.name, name, problem
                )));
            }
            debug_assert!(bits.all_used());
        }

        Ok(())
    }

    fn mark_driven(
        &self,
        driven_bits: &mut IndexMap<&str, DrivenBits>,
        signal: &SignalRef,
        msb: usize,
        lsb: usize,
    ) -> Result<(), NetlistError> {
        if let Some(bits) = driven_bits.get_mut(signal.name()) {
            match bits.driven(msb, lsb) {
                Ok(()) => {}
                Err(DrivenError::AlreadyDriven) => {
                    return Err(NetlistError::MultiplyDriven(format!(
                        "{}.{}{}",
                        self.name,
                        signal.name(),
                        range_fmt(msb, lsb)
                    )));
                }
            }
        }
        Ok(())
    }

    fn mark_used(
        &self,
        used_bits: &mut IndexMap<&str, UsedBits>,
        signal: &SignalRef,
        msb: usize,
        lsb: usize,
    ) {
        // reading back an output port is legal and needs no bookkeeping
        if let Some(bits) = used_bits.get_mut(signal.name()) {
            bits.used(msb, lsb);
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::{DataType, ModInst};

    fn adder_ports(width: usize) -> IndexMap<String, IO> {
        let mut ports = IndexMap::new();
        ports.insert("a".to_string(), IO::Input(DataType::signed(width)));
        ports.insert("b".to_string(), IO::Input(DataType::signed(width)));
        ports.insert("s".to_string(), IO::Output(DataType::signed(width + 1)));
        ports
    }

    fn two_row_tree() -> ModDef {
        let mut m = ModDef::new("tree");
        m.add_port("in", IO::Input(DataType::signed_array(2, 4)))
            .unwrap();
        m.add_port("out", IO::Output(DataType::signed(5))).unwrap();
        m.add_net("s", DataType::signed(5)).unwrap();
        m
    }

    #[test]
    fn valid_tree() {
        let mut m = two_row_tree();
        m.instantiate(
            ModInst::new("add", "ripple_add", adder_ports(4))
                .connect("a", SignalRef::element("in", 0))
                .connect("b", SignalRef::element("in", 1))
                .connect("s", SignalRef::whole("s")),
        )
        .unwrap();
        m.assign(SignalRef::whole("out"), SignalRef::whole("s"));
        assert_eq!(m.validate(), Ok(()));
    }

    #[test]
    fn unconnected_instance_port() {
        let mut m = two_row_tree();
        m.instantiate(
            ModInst::new("add", "ripple_add", adder_ports(4))
                .connect("a", SignalRef::element("in", 0))
                .connect("s", SignalRef::whole("s")),
        )
        .unwrap();
        m.assign(SignalRef::whole("out"), SignalRef::whole("s"));
        assert_eq!(
            m.validate(),
            Err(NetlistError::Unconnected("tree.add.b".to_string()))
        );
    }

    #[test]
    fn width_mismatch_on_result() {
        let mut m = two_row_tree();
        m.instantiate(
            ModInst::new("add", "ripple_add", adder_ports(4))
                .connect("a", SignalRef::element("in", 0))
                .connect("b", SignalRef::element("in", 1))
                .connect("s", SignalRef::element("in", 0)),
        )
        .unwrap();
        assert_eq!(
            m.validate(),
            Err(NetlistError::WidthMismatch {
                context: "tree.add.s".to_string(),
                expected: 5,
                actual: 4,
            })
        );
    }

    #[test]
    fn input_port_cannot_be_driven() {
        let mut m = ModDef::new("top");
        m.add_port("i", IO::Input(DataType::signed(4))).unwrap();
        m.add_port("j", IO::Input(DataType::signed(4))).unwrap();
        m.assign(SignalRef::whole("i"), SignalRef::whole("j"));
        assert_eq!(
            m.validate(),
            Err(NetlistError::MultiplyDriven("top.i[3:0]".to_string()))
        );
    }

    #[test]
    fn multiply_driven_net() {
        let mut m = two_row_tree();
        m.assign(SignalRef::whole("out"), SignalRef::whole("s"));
        m.assign(SignalRef::whole("out"), SignalRef::whole("s"));
        assert_eq!(
            m.validate(),
            Err(NetlistError::MultiplyDriven("tree.out[4:0]".to_string()))
        );
    }

    #[test]
    fn unused_input_word() {
        let mut m = ModDef::new("top");
        m.add_port("i", IO::Input(DataType::signed_array(2, 4)))
            .unwrap();
        m.add_port("o", IO::Output(DataType::signed(4))).unwrap();
        m.assign(SignalRef::whole("o"), SignalRef::element("i", 0));
        assert_eq!(
            m.validate(),
            Err(NetlistError::Unused("top.i[7:4]".to_string()))
        );
    }

    #[test]
    fn undriven_net() {
        let mut m = two_row_tree();
        m.assign(SignalRef::whole("out"), SignalRef::whole("s"));
        assert_eq!(
            m.validate(),
            Err(NetlistError::Undriven("tree.s".to_string()))
        );
    }

    #[test]
    fn unknown_instance_port() {
        let mut m = two_row_tree();
        m.instantiate(
            ModInst::new("add", "ripple_add", adder_ports(4)).connect("c", SignalRef::whole("s")),
        )
        .unwrap();
        assert_eq!(
            m.validate(),
            Err(NetlistError::UnknownSignal {
                module: "tree.add".to_string(),
                signal: "c".to_string(),
            })
        );
    }
}
