//! Validation and construction of platforms from descriptor sets.
//!
//! Assembly runs in stages. Each stage looks at the whole input before the
//! next one starts, so the error reported is always the first failure in
//! this order:
//!
//! 1. instruments: duplicate names, duplicate ports, parents
//! 2. channels: port references, local oscillators
//! 3. channels: duplicate names
//! 4. role assignments: channel references
//! 5. role assignments: role names
//! 6. role assignments: conflicts
//! 7. pairs
//!
//! Nothing is built until every stage has passed.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use crate::channel::Channel;
use crate::descriptor::{ChannelDescriptor, InstrumentDescriptor, PlatformDescriptor};
use crate::error::{AssemblyError, AssemblyResult};
use crate::instrument::{Instrument, InstrumentKind, Port};
use crate::platform::Platform;
use crate::qubit::{Qubit, QubitId, QubitPair, Role};
use crate::review::{ReviewNote, expected_direction};

/// Validate `descriptor` and build the platform it describes.
///
/// Either every check passes and a complete platform is returned, or the
/// first failing check is reported and nothing is built.
pub fn assemble(descriptor: &PlatformDescriptor) -> AssemblyResult<Platform> {
    debug!("Assembling platform '{}'", descriptor.name);

    let instruments = build_instruments(&descriptor.instruments)?;
    let channels = build_channels(&descriptor.channels, &instruments)?;
    let (qubits, mut review) = build_qubits(descriptor, &channels)?;
    let pairs = build_pairs(&descriptor.pairs, &qubits, &mut review)?;
    review.extend(inspect_wiring(&qubits, &channels, &instruments));

    for note in &review {
        warn!("Platform '{}': {}", descriptor.name, note);
    }
    info!(
        "Assembled platform '{}': {} instruments, {} channels, {} qubits, {} pairs",
        descriptor.name,
        instruments.len(),
        channels.len(),
        qubits.len(),
        pairs.len()
    );

    Ok(Platform::new(
        descriptor.name.clone(),
        descriptor.resonator_type,
        qubits,
        pairs,
        instruments,
        channels,
        descriptor.settings.clone(),
        review,
    ))
}

fn build_instruments(
    descriptors: &[InstrumentDescriptor],
) -> AssemblyResult<BTreeMap<String, Instrument>> {
    debug!("Checking {} instruments", descriptors.len());

    let mut names = FxHashSet::default();
    for descriptor in descriptors {
        if !names.insert(descriptor.name.as_str()) {
            return Err(AssemblyError::DuplicateInstrument {
                name: descriptor.name.clone(),
            });
        }
    }

    let mut instruments = BTreeMap::new();
    for descriptor in descriptors {
        let mut ports = BTreeMap::new();
        for (position, port) in descriptor.ports.iter().enumerate() {
            let line = port
                .line
                .unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX));
            let previous = ports.insert(
                port.name.clone(),
                Port::new(port.name.clone(), port.direction, line),
            );
            if previous.is_some() {
                return Err(AssemblyError::DuplicatePort {
                    instrument: descriptor.name.clone(),
                    port: port.name.clone(),
                });
            }
        }

        instruments.insert(
            descriptor.name.clone(),
            Instrument::new(
                descriptor.name.clone(),
                descriptor.effective_kind(),
                descriptor.model.clone(),
                descriptor.address.clone(),
                ports,
                descriptor.parent.clone(),
                descriptor.oscillator,
                descriptor.parameters.clone(),
            ),
        );
    }

    check_parents(descriptors, &instruments)?;
    Ok(instruments)
}

fn check_parents(
    descriptors: &[InstrumentDescriptor],
    instruments: &BTreeMap<String, Instrument>,
) -> AssemblyResult<()> {
    for descriptor in descriptors {
        if let Some(parent) = &descriptor.parent {
            if !instruments.contains_key(parent) {
                return Err(AssemblyError::UnresolvedParent {
                    instrument: descriptor.name.clone(),
                    parent: parent.clone(),
                });
            }
        }
    }

    // A chain longer than the instrument count loops without passing through
    // the start; the looping instruments are reported on their own turn.
    for descriptor in descriptors {
        let mut current = descriptor.parent.as_deref();
        let mut steps = 0;
        while let Some(name) = current {
            if name == descriptor.name {
                return Err(AssemblyError::ParentCycle {
                    instrument: descriptor.name.clone(),
                });
            }
            steps += 1;
            if steps > instruments.len() {
                break;
            }
            current = instruments.get(name).and_then(Instrument::parent);
        }
    }
    Ok(())
}

fn build_channels(
    descriptors: &[ChannelDescriptor],
    instruments: &BTreeMap<String, Instrument>,
) -> AssemblyResult<BTreeMap<String, Channel>> {
    debug!("Checking {} channels", descriptors.len());

    for descriptor in descriptors {
        let resolved = instruments
            .get(&descriptor.port.instrument)
            .is_some_and(|instrument| instrument.has_port(&descriptor.port.port));
        if !resolved {
            return Err(AssemblyError::UnresolvedPort {
                channel: descriptor.name.clone(),
                port: descriptor.port.clone(),
            });
        }

        if let Some(oscillator) = &descriptor.local_oscillator {
            match instruments.get(oscillator) {
                None => {
                    return Err(AssemblyError::UnresolvedOscillator {
                        channel: descriptor.name.clone(),
                        instrument: oscillator.clone(),
                    });
                }
                Some(instrument) if instrument.kind() != InstrumentKind::LocalOscillator => {
                    return Err(AssemblyError::NotAnOscillator {
                        channel: descriptor.name.clone(),
                        instrument: oscillator.clone(),
                        kind: instrument.kind().to_string(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    let mut channels = BTreeMap::new();
    for descriptor in descriptors {
        let channel = Channel::new(
            descriptor.name.clone(),
            descriptor.port.clone(),
            descriptor.local_oscillator.clone(),
        );
        if channels.insert(descriptor.name.clone(), channel).is_some() {
            return Err(AssemblyError::DuplicateChannel {
                name: descriptor.name.clone(),
            });
        }
    }
    Ok(channels)
}

fn build_qubits(
    descriptor: &PlatformDescriptor,
    channels: &BTreeMap<String, Channel>,
) -> AssemblyResult<(BTreeMap<QubitId, Qubit>, Vec<ReviewNote>)> {
    debug!("Checking {} role assignments", descriptor.roles.len());

    for assignment in &descriptor.roles {
        if !channels.contains_key(&assignment.channel) {
            return Err(AssemblyError::UnresolvedChannel {
                qubit: assignment.qubit.clone(),
                role: assignment.role.clone(),
                channel: assignment.channel.clone(),
            });
        }
    }

    let mut assignments = Vec::with_capacity(descriptor.roles.len());
    for assignment in &descriptor.roles {
        let role = assignment
            .role
            .parse::<Role>()
            .map_err(|_| AssemblyError::InvalidRole {
                qubit: assignment.qubit.clone(),
                role: assignment.role.clone(),
                channel: assignment.channel.clone(),
            })?;
        assignments.push((&assignment.qubit, role, &assignment.channel));
    }

    let mut qubits: BTreeMap<QubitId, Qubit> = descriptor
        .qubits
        .iter()
        .map(|id| (id.clone(), Qubit::new(id.clone())))
        .collect();
    let mut review = Vec::new();

    for (id, role, channel) in assignments {
        let qubit = qubits
            .entry(id.clone())
            .or_insert_with(|| Qubit::new(id.clone()));
        match qubit.channel(role) {
            Some(existing) if existing == channel.as_str() => {
                review.push(ReviewNote::RepeatedAssignment {
                    qubit: id.clone(),
                    role,
                    channel: channel.clone(),
                });
            }
            Some(existing) => {
                return Err(AssemblyError::ConflictingRole {
                    qubit: id.clone(),
                    role: role.to_string(),
                    existing: existing.to_string(),
                    requested: channel.clone(),
                });
            }
            None => {
                qubit.assign(role, channel.clone());
            }
        }
    }

    Ok((qubits, review))
}

fn build_pairs(
    pairs: &[(QubitId, QubitId)],
    qubits: &BTreeMap<QubitId, Qubit>,
    review: &mut Vec<ReviewNote>,
) -> AssemblyResult<BTreeSet<QubitPair>> {
    debug!("Checking {} pairs", pairs.len());

    let mut set = BTreeSet::new();
    for (first, second) in pairs {
        for qubit in [first, second] {
            if !qubits.contains_key(qubit) {
                return Err(AssemblyError::UnresolvedQubit {
                    first: first.clone(),
                    second: second.clone(),
                    qubit: qubit.clone(),
                });
            }
        }
        if first == second {
            return Err(AssemblyError::InvalidPair(first.clone()));
        }

        let pair = QubitPair(first.clone(), second.clone());
        if !set.insert(pair.clone()) {
            review.push(ReviewNote::RepeatedPair { pair });
        }
    }
    Ok(set)
}

/// Look for legal but suspicious wiring.
fn inspect_wiring(
    qubits: &BTreeMap<QubitId, Qubit>,
    channels: &BTreeMap<String, Channel>,
    instruments: &BTreeMap<String, Instrument>,
) -> Vec<ReviewNote> {
    let mut users: BTreeMap<(&str, Role), Vec<QubitId>> = BTreeMap::new();
    for (id, qubit) in qubits {
        for (role, channel) in qubit.assignments() {
            users.entry((channel, role)).or_default().push(id.clone());
        }
    }

    let mut notes = Vec::new();
    for ((channel, role), ids) in &users {
        if !role.is_multiplexed() && ids.len() > 1 {
            notes.push(ReviewNote::SharedChannel {
                channel: (*channel).to_string(),
                role: *role,
                qubits: ids.clone(),
            });
        }
    }

    for (channel, role) in users.keys() {
        let Some(bound) = channels.get(*channel) else {
            continue;
        };
        let Some(port) = instruments
            .get(&bound.port().instrument)
            .and_then(|instrument| instrument.port(&bound.port().port))
        else {
            continue;
        };
        if port.direction != expected_direction(*role) {
            notes.push(ReviewNote::DirectionMismatch {
                channel: (*channel).to_string(),
                role: *role,
                port: bound.port().clone(),
                direction: port.direction,
            });
        }
    }

    let used: FxHashSet<&str> = users.keys().map(|(channel, _)| *channel).collect();
    for name in channels.keys() {
        if !used.contains(name.as_str()) {
            notes.push(ReviewNote::UnassignedChannel {
                channel: name.clone(),
            });
        }
    }

    notes
}
