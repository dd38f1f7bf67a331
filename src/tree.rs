// SPDX-License-Identifier: Apache-2.0

//! Construction of binary adder reduction trees.
//!
//! A tree over `N` signed words of `W` bits has `log2(N)` layers. Layer `l`
//! pairs up the `N / 2^(l-1)` signals of layer `l - 1` and adds each pair
//! with one leaf adder whose operands are `W + l - 1` bits wide, producing
//! `N / 2^l` signals of `W + l` bits. Layer 0 is the input itself, and the
//! last layer's single signal drives the module output.

use itertools::Itertools;
use log::{debug, trace};

use crate::adder::check_contract;
use crate::error::{ConfigError, Error, NetlistError};
use crate::range::SignedRange;
use crate::stub::emit_adder_stub;
use crate::util::is_identifier;
use crate::{
    DataType, IO, LeafAdder, ModDef, ModInst, RippleAdder, SignalRef, TreeConfig, Usage,
};

/// Name of the net carrying the outputs of `layer`; layer 0 aliases the
/// module input.
pub fn layer_net_name(layer: usize) -> String {
    format!("layer{}out", layer)
}

/// Name of the adder instance combining pair `pair` of `layer`.
pub fn instance_name(layer: usize, pair: usize) -> String {
    format!("ra_layer{}_pair{}", layer, pair)
}

/// One layer of adders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layer {
    /// 1-based layer index.
    pub index: usize,
    pub num_inputs: usize,
    pub num_outputs: usize,
}

impl Layer {
    /// Width of the operands this layer adds.
    pub fn operand_width(&self, word_width: usize) -> usize {
        word_width + (self.index - 1)
    }

    /// Width of the signals this layer produces.
    pub fn result_width(&self, word_width: usize) -> usize {
        word_width + self.index
    }
}

/// The layer structure of a tree over `rows` inputs, independent of widths
/// and names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeShape {
    rows: usize,
}

impl TreeShape {
    pub fn new(rows: usize) -> Result<Self, ConfigError> {
        if !rows.is_power_of_two() {
            return Err(ConfigError::InvalidRowCount(rows));
        }
        Ok(TreeShape { rows })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of adder layers, `log2(rows)`.
    pub fn depth(&self) -> usize {
        self.rows.trailing_zeros() as usize
    }

    /// Number of signals at `layer`; layer 0 is the input.
    pub fn signals_at(&self, layer: usize) -> usize {
        self.rows >> layer
    }

    /// Total number of adders, one per internal node of the tree.
    pub fn instance_count(&self) -> usize {
        self.rows - 1
    }

    /// Iterates over the adder layers, from the inputs towards the output.
    pub fn layers(&self) -> impl Iterator<Item = Layer> + '_ {
        (1..=self.depth()).map(|index| {
            let num_inputs = self.signals_at(index - 1);
            Layer {
                index,
                num_inputs,
                num_outputs: num_inputs / 2,
            }
        })
    }
}

/// Builds the module definition of an adder tree from a `TreeConfig`, using
/// leaf adders of type `A`.
#[derive(Clone, Debug)]
pub struct TreeBuilder<A: LeafAdder = RippleAdder> {
    config: TreeConfig,
    adder: A,
}

impl TreeBuilder<RippleAdder> {
    /// Creates a builder that instantiates a `RippleAdder` named after
    /// `config.adder_name`.
    pub fn new(config: TreeConfig) -> Self {
        let adder = RippleAdder::new(&config.adder_name);
        TreeBuilder { config, adder }
    }
}

impl<A: LeafAdder> TreeBuilder<A> {
    /// Creates a builder that instantiates `adder` instead of the default
    /// ripple-carry adder. The adder's own module name takes precedence over
    /// `config.adder_name`.
    pub fn with_adder(config: TreeConfig, adder: A) -> Self {
        TreeBuilder { config, adder }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn adder(&self) -> &A {
        &self.adder
    }

    /// Checks the configuration and the adder contract, returning the shape
    /// of the tree to build.
    fn check(&self) -> Result<TreeShape, ConfigError> {
        self.config.validate()?;
        let adder_name = self.adder.module_name();
        if !is_identifier(adder_name) {
            return Err(ConfigError::InvalidIdentifier {
                field: "adder_name",
                name: adder_name.to_string(),
            });
        }
        if adder_name == self.config.module_name {
            return Err(ConfigError::NameCollision(adder_name.to_string()));
        }

        let shape = TreeShape::new(self.config.rows)?;
        let word_width = self.config.word_width;
        check_contract(
            &self.adder,
            shape.layers().map(|layer| layer.operand_width(word_width)),
        )?;
        Ok(shape)
    }

    /// Builds the module definition. Nothing is built if the configuration
    /// is invalid.
    pub fn build(&self) -> Result<ModDef, Error> {
        let shape = self.check()?;
        let word_width = self.config.word_width;
        debug!(
            "Building {}: {} rows of {} bits, depth {}",
            self.config.module_name,
            shape.rows(),
            word_width,
            shape.depth()
        );

        let mut mod_def = ModDef::new(&self.config.module_name);
        mod_def.add_comment(format!("WORDLEN={} NROWS={}", word_width, shape.rows()));

        let input = mod_def.add_port(
            &self.config.input_name,
            IO::Input(DataType::signed_array(shape.rows(), word_width)),
        )?;
        let output = mod_def.add_port(
            &self.config.output_name,
            IO::Output(DataType::signed(self.config.output_width())),
        )?;

        // Layer 0 is an alias for the input
        let mut prev = mod_def.add_net(
            layer_net_name(0),
            DataType::signed_array(shape.rows(), word_width),
        )?;
        mod_def.assign(prev.clone(), input);

        let (port_a, port_b) = self.adder.operand_ports();
        for layer in shape.layers() {
            let operand_width = layer.operand_width(word_width);
            let result_width = layer.result_width(word_width);
            trace!(
                "Layer {}: {} adders of width {}",
                layer.index, layer.num_outputs, operand_width
            );

            // The last layer produces a single word instead of a bundle
            let out_ty = if layer.num_outputs > 1 {
                DataType::signed_array(layer.num_outputs, result_width)
            } else {
                DataType::signed(result_width)
            };
            let out = mod_def.add_net(layer_net_name(layer.index), out_ty)?;

            for (pair, (a, b)) in (0..layer.num_inputs).tuples().enumerate() {
                let result = if layer.num_outputs > 1 {
                    SignalRef::element(out.name(), pair)
                } else {
                    out.clone()
                };
                let inst = ModInst::new(
                    instance_name(layer.index, pair),
                    self.adder.module_name(),
                    self.adder.ports(operand_width),
                )
                .parameter(self.adder.width_parameter(), operand_width)
                .connect(port_a, SignalRef::element(prev.name(), a))
                .connect(port_b, SignalRef::element(prev.name(), b))
                .connect(self.adder.result_port(), result);
                mod_def.instantiate(inst)?;
            }

            prev = out;
        }

        // With no adder layers, the output is taken straight from the only
        // input word.
        let last = if shape.depth() == 0 {
            SignalRef::element(prev.name(), 0)
        } else {
            prev
        };
        mod_def.assign(output, last);

        Ok(mod_def)
    }

    /// Builds, validates and emits the tree in the configured dialect. When
    /// the configuration asks for it, a stub of the leaf adder precedes the
    /// tree. Either the complete text or an error is returned.
    pub fn generate(&self) -> Result<String, Error> {
        let mod_def = self.build()?;
        let shape = TreeShape::new(self.config.rows)?;
        check_ranges(
            self.config.word_width,
            &shape,
            &self.adder,
            &self.config.output_name,
        )?;

        let dialect = self.config.dialect;
        let mut text = String::new();
        if self.config.adder_usage == Usage::EmitStub {
            text.push_str(&emit_adder_stub(
                &self.adder,
                self.config.word_width,
                dialect,
            ));
        }
        text.push_str(&mod_def.emit(dialect, true)?);
        debug!(
            "Emitted {} with {} adders",
            mod_def.get_name(),
            mod_def.get_instances().len()
        );
        Ok(text)
    }
}

/// Proves that no layer of the tree can overflow: the sum of two operands
/// must fit in the result width `adder` declares, and the final sum must fit
/// in the `output` port. `word_width` must be positive.
fn check_ranges<A: LeafAdder + ?Sized>(
    word_width: usize,
    shape: &TreeShape,
    adder: &A,
    output: &str,
) -> Result<(), NetlistError> {
    let mut range = SignedRange::of_width(word_width);
    for layer in shape.layers() {
        let sum = range.plus(&range);
        let width = adder.result_width(layer.operand_width(word_width));
        if !sum.fits_in(width) {
            return Err(NetlistError::Overflow {
                context: layer_net_name(layer.index),
                min: sum.min.to_string(),
                max: sum.max.to_string(),
                width,
            });
        }
        range = sum;
    }

    let output_width = word_width + shape.depth();
    if !range.fits_in(output_width) {
        return Err(NetlistError::Overflow {
            context: output.to_string(),
            min: range.min.to_string(),
            max: range.max.to_string(),
            width: output_width,
        });
    }
    Ok(())
}

/// Generates a SystemVerilog adder tree summing `rows` signed words of
/// `word_width` bits, instantiating the adder module `adder_name`. The input
/// bundle is named `input_name` and the `word_width + log2(rows)` bit sum is
/// driven onto `output_name`.
pub fn generate(
    word_width: usize,
    rows: usize,
    adder_name: &str,
    input_name: &str,
    output_name: &str,
) -> Result<String, Error> {
    let config = TreeConfig {
        word_width,
        rows,
        adder_name: adder_name.to_string(),
        input_name: input_name.to_string(),
        output_name: output_name.to_string(),
        ..Default::default()
    };
    TreeBuilder::new(config).generate()
}
