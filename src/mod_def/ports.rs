// SPDX-License-Identifier: Apache-2.0

use crate::error::ConfigError;
use crate::{DataType, IO, ModDef, SignalRef};

impl ModDef {
    /// Adds a port to the module definition with the given name. The direction
    /// and type are specified via the `io` parameter. Returns a reference to
    /// the whole port.
    pub fn add_port(&mut self, name: impl AsRef<str>, io: IO) -> Result<SignalRef, ConfigError> {
        let name = name.as_ref();
        if self.is_declared(name) {
            return Err(ConfigError::NameCollision(name.to_string()));
        }
        self.ports.insert(name.to_string(), io);
        Ok(SignalRef::whole(name))
    }

    /// Declares an internal net. Returns a reference to the whole net.
    pub fn add_net(
        &mut self,
        name: impl AsRef<str>,
        ty: DataType,
    ) -> Result<SignalRef, ConfigError> {
        let name = name.as_ref();
        if self.is_declared(name) {
            return Err(ConfigError::NameCollision(name.to_string()));
        }
        self.nets.insert(name.to_string(), ty);
        Ok(SignalRef::whole(name))
    }

    /// Returns `true` if this module definition has a port with the given name.
    pub fn has_port(&self, name: impl AsRef<str>) -> bool {
        self.ports.contains_key(name.as_ref())
    }

    /// Returns the port on this module definition with the given name.
    pub fn get_port(&self, name: impl AsRef<str>) -> Option<&IO> {
        self.ports.get(name.as_ref())
    }

    /// Returns all ports, in declaration order.
    pub fn get_ports(&self) -> impl Iterator<Item = (&str, &IO)> {
        self.ports.iter().map(|(name, io)| (name.as_str(), io))
    }

    pub fn get_net(&self, name: impl AsRef<str>) -> Option<&DataType> {
        self.nets.get(name.as_ref())
    }

    /// Returns all internal nets, in declaration order.
    pub fn get_nets(&self) -> impl Iterator<Item = (&str, &DataType)> {
        self.nets.iter().map(|(name, ty)| (name.as_str(), ty))
    }
}
