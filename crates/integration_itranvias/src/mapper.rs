//! Mapping from raw payload records to typed entities
//!
//! Everything in here is pure: no I/O and no retained state.

use std::collections::HashMap;

use tracing::warn;

use crate::error::ItranviasError;
use crate::models::{Bus, Line, Stop};
use crate::raw::{RawBus, RawLine, RawSnapshot, RawStop, RawStopBusesResponse};

/// Build a full [`Stop`] from its raw record, resolving every connected line
/// against the snapshot
///
/// Connections keep the order of `enlaces`, repeats included.
///
/// # Errors
///
/// Returns [`ItranviasError::UnknownLine`] if `enlaces` holds an id that no
/// line record in the snapshot declares.
pub fn parse_stop(stop: &RawStop, snapshot: &RawSnapshot) -> Result<Stop, ItranviasError> {
    let connections = stop
        .enlaces
        .iter()
        .map(|&line_id| {
            snapshot
                .line(line_id)
                .map(parse_line)
                .ok_or(ItranviasError::UnknownLine {
                    stop_id: stop.id,
                    line_id,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Stop {
        id: Some(stop.id),
        name: stop.nombre.clone(),
        connections,
        long: Some(stop.posx),
        lat: Some(stop.posy),
    })
}

/// Build a [`Line`] whose origin and destination are name-only stops
#[must_use]
pub fn parse_line(line: &RawLine) -> Line {
    Line {
        id: line.id,
        name: line.lin_comer.clone(),
        color: line.color.clone(),
        origin: Stop::named(line.nombre_orig.clone()),
        destination: Stop::named(line.nombre_dest.clone()),
    }
}

/// Build a [`Bus`] from its raw record
#[must_use]
pub fn parse_bus(bus: RawBus) -> Bus {
    Bus {
        id: bus.bus,
        time: bus.tiempo,
        distance: bus.distancia,
        state: bus.estado,
        last_stop: Stop::with_id(bus.ult_parada),
    }
}

/// Group the real-time arrivals of a stop by line id
///
/// Buses keep the order the service sent them in. If a line id appears more
/// than once, the later entry replaces the earlier one.
#[must_use]
pub fn parse_stop_buses(response: RawStopBusesResponse) -> HashMap<i64, Vec<Bus>> {
    let mut lines = HashMap::with_capacity(response.buses.lineas.len());

    for line in response.buses.lineas {
        let buses: Vec<Bus> = line.buses.into_iter().map(parse_bus).collect();
        if lines.insert(line.linea, buses).is_some() {
            warn!(line = line.linea, "Line listed twice, keeping the later entry");
        }
    }

    lines
}
