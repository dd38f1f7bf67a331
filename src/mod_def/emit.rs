// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use itertools::Itertools;

use crate::error::{Error, NetlistError};
use crate::{Dialect, IO, ModDef, ModInst, SignalRef};

impl ModDef {
    /// Writes HDL code for this module definition to the given file path. If
    /// `validate` is `true`, validate the module definition before emitting.
    /// Nothing is written if validation fails.
    pub fn emit_to_file(&self, path: &Path, dialect: Dialect, validate: bool) -> Result<(), Error> {
        let text = self.emit(dialect, validate)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Returns HDL code for this module definition as a string. If `validate`
    /// is `true`, validate the module definition before emitting.
    pub fn emit(&self, dialect: Dialect, validate: bool) -> Result<String, NetlistError> {
        if validate {
            self.validate()?;
        }

        let mut text = String::new();

        // Module header and port list
        if self.ports.is_empty() {
            text.push_str(&format!("module {};\n", self.name));
        } else {
            text.push_str(&format!("module {} (\n", self.name));
            let port_decls = self
                .ports
                .iter()
                .map(|(name, io)| {
                    let direction = match io {
                        IO::Input(_) => "input",
                        IO::Output(_) => "output",
                    };
                    format!("  {} {} {}", direction, dialect.type_decl(io.ty()), name)
                })
                .join(",\n");
            text.push_str(&port_decls);
            text.push_str("\n);\n");
        }

        for comment in &self.comments {
            text.push_str(&format!("  // {}\n", comment));
        }

        for (name, ty) in &self.nets {
            text.push_str(&format!("  {} {};\n", dialect.type_decl(ty), name));
        }

        for inst in self.instances.values() {
            text.push_str(&self.emit_instance(inst, dialect)?);
        }

        for assignment in &self.assignments {
            text.push_str(&format!(
                "  assign {} = {};\n",
                self.ref_expr(&assignment.lhs, dialect)?,
                self.ref_expr(&assignment.rhs, dialect)?
            ));
        }

        text.push_str("endmodule\n");
        Ok(text)
    }

    fn emit_instance(&self, inst: &ModInst, dialect: Dialect) -> Result<String, NetlistError> {
        let mut text = format!("  {}", inst.module);
        if !inst.parameters.is_empty() {
            let bindings = inst
                .parameters
                .iter()
                .map(|(name, value)| format!(".{}({})", name, value))
                .join(", ");
            text.push_str(&format!(" #({})", bindings));
        }
        text.push_str(&format!(" {} (\n", inst.name));

        let mut connections = Vec::with_capacity(inst.ports.len());
        for port_name in inst.ports.keys() {
            let expr = match inst.connections.get(port_name) {
                Some(signal) => self.ref_expr(signal, dialect)?,
                None => String::new(),
            };
            connections.push(format!("    .{}({})", port_name, expr));
        }
        text.push_str(&connections.join(",\n"));
        text.push_str("\n  );\n");
        Ok(text)
    }

    fn ref_expr(&self, signal: &SignalRef, dialect: Dialect) -> Result<String, NetlistError> {
        let (ty, _) = self.resolve(signal)?;
        Ok(match signal {
            SignalRef::Whole(name) => name.clone(),
            SignalRef::Element(name, index) => dialect.element_ref(name, ty, *index),
        })
    }
}
