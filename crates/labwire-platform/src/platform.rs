//! The assembled, immutable platform.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::channel::Channel;
use crate::instrument::{Instrument, Port};
use crate::qubit::{Qubit, QubitId, QubitPair, Role};
use crate::review::ReviewNote;
use crate::settings::{ResonatorType, Settings};

/// Complete wiring of a lab setup, handed to the experiment engine.
///
/// A `Platform` can only be obtained through assembly, so every channel a
/// qubit names exists and every channel's port exists on a declared
/// instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Platform {
    name: String,
    resonator_type: ResonatorType,
    qubits: BTreeMap<QubitId, Qubit>,
    pairs: BTreeSet<QubitPair>,
    instruments: BTreeMap<String, Instrument>,
    channels: BTreeMap<String, Channel>,
    settings: Settings,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    review: Vec<ReviewNote>,
}

/// A qubit role followed through to the hardware.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRole<'a> {
    /// The channel serving the role.
    pub channel: &'a Channel,
    /// The instrument owning the channel's port.
    pub instrument: &'a Instrument,
    /// The port itself.
    pub port: &'a Port,
    /// The channel's local oscillator, if any.
    pub local_oscillator: Option<&'a Instrument>,
}

impl Platform {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        resonator_type: ResonatorType,
        qubits: BTreeMap<QubitId, Qubit>,
        pairs: BTreeSet<QubitPair>,
        instruments: BTreeMap<String, Instrument>,
        channels: BTreeMap<String, Channel>,
        settings: Settings,
        review: Vec<ReviewNote>,
    ) -> Self {
        Self {
            name,
            resonator_type,
            qubits,
            pairs,
            instruments,
            channels,
            settings,
            review,
        }
    }

    /// Platform name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resonator geometry.
    pub fn resonator_type(&self) -> ResonatorType {
        self.resonator_type
    }

    /// Qubits keyed by id.
    pub fn qubits(&self) -> &BTreeMap<QubitId, Qubit> {
        &self.qubits
    }

    /// Look up a qubit.
    pub fn qubit(&self, id: &QubitId) -> Option<&Qubit> {
        self.qubits.get(id)
    }

    /// Coupled qubit pairs.
    pub fn pairs(&self) -> &BTreeSet<QubitPair> {
        &self.pairs
    }

    /// Instruments keyed by name.
    pub fn instruments(&self) -> &BTreeMap<String, Instrument> {
        &self.instruments
    }

    /// Look up an instrument.
    pub fn instrument(&self, name: &str) -> Option<&Instrument> {
        self.instruments.get(name)
    }

    /// Modules hosted by `parent`, ordered by name.
    pub fn children<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a Instrument> + 'a {
        self.instruments
            .values()
            .filter(move |instrument| instrument.parent() == Some(parent))
    }

    /// Channels keyed by name.
    pub fn channels(&self) -> &BTreeMap<String, Channel> {
        &self.channels
    }

    /// Look up a channel.
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    /// Execution settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Findings raised during assembly.
    pub fn review_notes(&self) -> &[ReviewNote] {
        &self.review
    }

    /// Follow a qubit role to its channel, instrument and port.
    ///
    /// Returns `None` when the qubit does not exist or has no channel in
    /// that role.
    pub fn resolve(&self, qubit: &QubitId, role: Role) -> Option<ResolvedRole<'_>> {
        let channel = self.channel(self.qubit(qubit)?.channel(role)?)?;
        self.resolve_channel(channel)
    }

    /// Follow a channel to its instrument and port.
    pub fn resolve_channel<'a>(&'a self, channel: &'a Channel) -> Option<ResolvedRole<'a>> {
        let instrument = self.instrument(&channel.port().instrument)?;
        let port = instrument.port(&channel.port().port)?;
        let local_oscillator = channel
            .local_oscillator()
            .and_then(|name| self.instrument(name));
        Some(ResolvedRole {
            channel,
            instrument,
            port,
            local_oscillator,
        })
    }

    /// Every qubit role with its resolution, ordered by qubit then role.
    pub fn wiring(&self) -> impl Iterator<Item = (&QubitId, Role, ResolvedRole<'_>)> {
        self.qubits.iter().flat_map(move |(id, qubit)| {
            qubit.assignments().filter_map(move |(role, channel)| {
                let resolved = self.resolve_channel(self.channel(channel)?)?;
                Some((id, role, resolved))
            })
        })
    }
}
