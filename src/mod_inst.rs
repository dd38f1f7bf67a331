// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use indexmap::IndexMap;

use crate::IO;

/// A reference to a port or net of the enclosing module: either the whole
/// signal, or a single word of a packed bundle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SignalRef {
    Whole(String),
    Element(String, usize),
}

impl SignalRef {
    pub fn whole(name: impl AsRef<str>) -> Self {
        SignalRef::Whole(name.as_ref().to_string())
    }

    pub fn element(name: impl AsRef<str>, index: usize) -> Self {
        SignalRef::Element(name.as_ref().to_string(), index)
    }

    /// Returns the name of the referenced port or net.
    pub fn name(&self) -> &str {
        match self {
            SignalRef::Whole(name) => name,
            SignalRef::Element(name, _) => name,
        }
    }
}

impl fmt::Display for SignalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalRef::Whole(name) => write!(f, "{name}"),
            SignalRef::Element(name, index) => write!(f, "{name}[{index}]"),
        }
    }
}

/// Represents an instance of a leaf module within a module definition.
///
/// `ports` mirrors the interface of the instantiated module for the given
/// parameter values; `connections` maps each port name to the signal of the
/// enclosing module it is wired to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModInst {
    pub(crate) name: String,
    pub(crate) module: String,
    pub(crate) parameters: IndexMap<String, usize>,
    pub(crate) ports: IndexMap<String, IO>,
    pub(crate) connections: IndexMap<String, SignalRef>,
}

impl ModInst {
    /// Creates an unconnected instance named `name` of module `module`.
    pub fn new(
        name: impl AsRef<str>,
        module: impl AsRef<str>,
        ports: IndexMap<String, IO>,
    ) -> Self {
        ModInst {
            name: name.as_ref().to_string(),
            module: module.as_ref().to_string(),
            parameters: IndexMap::new(),
            ports,
            connections: IndexMap::new(),
        }
    }

    /// Overrides a parameter of the instantiated module.
    pub fn parameter(mut self, name: impl AsRef<str>, value: usize) -> Self {
        self.parameters.insert(name.as_ref().to_string(), value);
        self
    }

    /// Wires `port` to `signal`. Connecting the same port twice replaces the
    /// earlier connection.
    pub fn connect(mut self, port: impl AsRef<str>, signal: SignalRef) -> Self {
        self.connections.insert(port.as_ref().to_string(), signal);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name of the instantiated module.
    pub fn module_name(&self) -> &str {
        &self.module
    }

    pub fn get_parameter(&self, name: impl AsRef<str>) -> Option<usize> {
        self.parameters.get(name.as_ref()).copied()
    }

    pub fn get_port(&self, name: impl AsRef<str>) -> Option<&IO> {
        self.ports.get(name.as_ref())
    }

    /// Returns the signal that `port` is wired to, if any.
    pub fn get_connection(&self, port: impl AsRef<str>) -> Option<&SignalRef> {
        self.connections.get(port.as_ref())
    }
}
