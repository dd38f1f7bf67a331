// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;

use crate::error::NetlistError;
use crate::{DataType, IO, ModInst, SignalRef};

mod emit;
mod instances;
mod ports;
mod validate;

/// A continuous assignment, `assign lhs = rhs;`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub lhs: SignalRef,
    pub rhs: SignalRef,
}

/// Represents a module definition, like `module <mod_def_name> ... endmodule`
/// in Verilog.
///
/// A `ModDef` is an ordered list of records: ports, internal nets, instances
/// and continuous assignments. Records are emitted in insertion order, so two
/// identically built definitions produce identical text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModDef {
    pub(crate) name: String,
    pub(crate) comments: Vec<String>,
    pub(crate) ports: IndexMap<String, IO>,
    pub(crate) nets: IndexMap<String, DataType>,
    pub(crate) instances: IndexMap<String, ModInst>,
    pub(crate) assignments: Vec<Assignment>,
}

impl ModDef {
    /// Creates a new, empty module definition with the given name.
    pub fn new(name: impl AsRef<str>) -> ModDef {
        ModDef {
            name: name.as_ref().to_string(),
            comments: Vec::new(),
            ports: IndexMap::new(),
            nets: IndexMap::new(),
            instances: IndexMap::new(),
            assignments: Vec::new(),
        }
    }

    /// Returns the name of this module definition.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Adds a single-line comment emitted at the top of the module body.
    pub fn add_comment(&mut self, text: impl AsRef<str>) {
        self.comments.push(text.as_ref().to_string());
    }

    /// Adds a continuous assignment driving `lhs` from `rhs`.
    pub fn assign(&mut self, lhs: SignalRef, rhs: SignalRef) {
        self.assignments.push(Assignment { lhs, rhs });
    }

    pub fn get_assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Returns the type of the port or net called `name`.
    pub fn signal_type(&self, name: &str) -> Option<&DataType> {
        self.ports
            .get(name)
            .map(|io| io.ty())
            .or_else(|| self.nets.get(name))
    }

    /// Returns the width in bits of the signal selected by `signal`.
    pub fn ref_width(&self, signal: &SignalRef) -> Result<usize, NetlistError> {
        let (msb, lsb) = self.ref_bits(signal)?;
        Ok(msb - lsb + 1)
    }

    /// Resolves `signal` to the `(msb, lsb)` bit range it selects within the
    /// flattened signal.
    pub(crate) fn ref_bits(&self, signal: &SignalRef) -> Result<(usize, usize), NetlistError> {
        self.resolve(signal).map(|(_, bits)| bits)
    }

    /// Looks up the declared type of the signal `signal` refers to, along
    /// with the bit range it selects.
    pub(crate) fn resolve(
        &self,
        signal: &SignalRef,
    ) -> Result<(&DataType, (usize, usize)), NetlistError> {
        let ty = self
            .signal_type(signal.name())
            .ok_or_else(|| NetlistError::UnknownSignal {
                module: self.name.clone(),
                signal: signal.name().to_string(),
            })?;
        match signal {
            SignalRef::Whole(_) => Ok((ty, (ty.bits() - 1, 0))),
            SignalRef::Element(name, index) => {
                if !ty.is_array() || *index >= ty.word_count() {
                    return Err(NetlistError::IndexOutOfRange {
                        module: self.name.clone(),
                        signal: name.clone(),
                        index: *index,
                    });
                }
                Ok((ty, ((index + 1) * ty.width - 1, index * ty.width)))
            }
        }
    }

    fn is_declared(&self, name: &str) -> bool {
        self.ports.contains_key(name)
            || self.nets.contains_key(name)
            || self.instances.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_element_bits() {
        let mut m = ModDef::new("top");
        m.add_port("in", IO::Input(DataType::signed_array(4, 8)))
            .unwrap();
        m.add_net("n", DataType::signed(9)).unwrap();

        assert_eq!(m.ref_bits(&SignalRef::element("in", 2)), Ok((23, 16)));
        assert_eq!(m.ref_bits(&SignalRef::whole("in")), Ok((31, 0)));
        assert_eq!(m.ref_width(&SignalRef::whole("n")), Ok(9));
    }

    #[test]
    fn rejects_bad_references() {
        let mut m = ModDef::new("top");
        m.add_net("n", DataType::signed(9)).unwrap();

        assert!(matches!(
            m.ref_bits(&SignalRef::element("n", 0)),
            Err(NetlistError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            m.ref_bits(&SignalRef::whole("missing")),
            Err(NetlistError::UnknownSignal { .. })
        ));
    }
}
