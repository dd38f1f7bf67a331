// SPDX-License-Identifier: Apache-2.0

use crate::error::ConfigError;
use crate::{ModDef, ModInst};

impl ModDef {
    /// Adds `inst` to this module definition. Instance names share a
    /// namespace with ports and nets.
    pub fn instantiate(&mut self, inst: ModInst) -> Result<(), ConfigError> {
        if self.is_declared(&inst.name) {
            return Err(ConfigError::NameCollision(inst.name));
        }
        self.instances.insert(inst.name.clone(), inst);
        Ok(())
    }

    /// Returns a vector of all module instances within this module definition,
    /// in instantiation order.
    pub fn get_instances(&self) -> Vec<&ModInst> {
        self.instances.values().collect()
    }

    /// Returns the module instance within this module definition with the given
    /// name.
    pub fn get_instance(&self, name: impl AsRef<str>) -> Option<&ModInst> {
        self.instances.get(name.as_ref())
    }
}
