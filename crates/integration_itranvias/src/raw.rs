//! Raw payload schema
//!
//! Record types mirroring the JSON the query endpoint returns. Payloads are
//! decoded into these once, right after the fetch, so a missing field
//! surfaces as [`ItranviasError::ParseError`] instead of a fault deep in the
//! mapping code.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ItranviasError;
use crate::models::Reading;

/// Decode fetched nested data into one of the raw record types
///
/// # Errors
///
/// Returns [`ItranviasError::ParseError`] when the payload does not match
/// the expected shape.
pub fn decode<T: DeserializeOwned>(data: serde_json::Value) -> Result<T, ItranviasError> {
    serde_json::from_value(data).map_err(|e| ItranviasError::ParseError(e.to_string()))
}

// --- Function 0: real-time arrivals ---

/// Response of the real-time arrivals query
#[derive(Debug, Clone, Deserialize)]
pub struct RawStopBusesResponse {
    /// Arrivals block
    pub buses: RawBusesBlock,
}

/// Arrivals grouped by line
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBusesBlock {
    /// Lines with buses approaching the stop, absent when there are none
    #[serde(default)]
    pub lineas: Vec<RawLineArrivals>,
}

/// Buses of one line approaching the stop
#[derive(Debug, Clone, Deserialize)]
pub struct RawLineArrivals {
    /// Line id
    pub linea: i64,
    /// Approaching buses, in service order
    pub buses: Vec<RawBus>,
}

/// One approaching bus
#[derive(Debug, Clone, Deserialize)]
pub struct RawBus {
    pub bus: i64,
    pub tiempo: Reading,
    pub distancia: Reading,
    pub estado: Reading,
    pub ult_parada: i64,
}

// --- Function 7: network snapshot ---

/// Response of the network snapshot query
#[derive(Debug, Clone, Deserialize)]
pub struct RawNetworkResponse {
    #[serde(rename = "iTranvias")]
    pub itranvias: RawNetworkEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNetworkEnvelope {
    pub actualizacion: RawSnapshot,
}

/// Every stop and line of the network at one dataset version
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSnapshot {
    pub paradas: Vec<RawStop>,
    pub lineas: Vec<RawLine>,
}

impl RawSnapshot {
    /// First line record with the given id
    #[must_use]
    pub fn line(&self, line_id: i64) -> Option<&RawLine> {
        self.lineas.iter().find(|line| line.id == line_id)
    }

    /// First stop record with the given id
    #[must_use]
    pub fn stop(&self, stop_id: i64) -> Option<&RawStop> {
        self.paradas.iter().find(|stop| stop.id == stop_id)
    }
}

/// A stop record from the snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct RawStop {
    pub id: i64,
    pub nombre: String,
    pub posx: f64,
    pub posy: f64,
    /// Ids of the lines serving this stop
    pub enlaces: Vec<i64>,
}

/// A line record from the snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct RawLine {
    pub id: i64,
    pub lin_comer: String,
    pub color: String,
    pub nombre_orig: String,
    pub nombre_dest: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_network_response() {
        let data = json!({
            "iTranvias": {
                "actualizacion": {
                    "paradas": [
                        { "id": 5, "nombre": "Main Sq", "posx": 1.0, "posy": 2.0, "enlaces": [10] }
                    ],
                    "lineas": [
                        { "id": 10, "lin_comer": "L1", "color": "#fff", "nombre_orig": "A", "nombre_dest": "B" }
                    ]
                }
            }
        });

        let raw: RawNetworkResponse = decode(data).unwrap();
        let snapshot = raw.itranvias.actualizacion;
        assert_eq!(snapshot.paradas.len(), 1);
        assert_eq!(snapshot.paradas[0].enlaces, vec![10]);
        assert_eq!(snapshot.line(10).unwrap().lin_comer, "L1");
        assert!(snapshot.line(11).is_none());
        assert_eq!(snapshot.stop(5).unwrap().nombre, "Main Sq");
    }

    #[test]
    fn test_decode_stop_buses_without_lineas() {
        let raw: RawStopBusesResponse = decode(json!({ "buses": {} })).unwrap();
        assert!(raw.buses.lineas.is_empty());
    }

    #[test]
    fn test_decode_missing_field_is_parse_error() {
        let data = json!({
            "iTranvias": {
                "actualizacion": {
                    "paradas": [{ "id": 5, "posx": 1.0, "posy": 2.0, "enlaces": [] }],
                    "lineas": []
                }
            }
        });

        let result = decode::<RawNetworkResponse>(data);
        match result {
            Err(ItranviasError::ParseError(message)) => assert!(message.contains("nombre")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_stop_without_enlaces_is_parse_error() {
        let data = json!({
            "iTranvias": {
                "actualizacion": {
                    "paradas": [{ "id": 5, "nombre": "Main Sq", "posx": 1.0, "posy": 2.0 }],
                    "lineas": []
                }
            }
        });

        match decode::<RawNetworkResponse>(data) {
            Err(ItranviasError::ParseError(message)) => assert!(message.contains("enlaces")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_line_arrivals_without_buses_is_parse_error() {
        let data = json!({ "buses": { "lineas": [{ "linea": 1400 }] } });

        match decode::<RawStopBusesResponse>(data) {
            Err(ItranviasError::ParseError(message)) => assert!(message.contains("buses")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_missing_buses_block_is_parse_error() {
        let result = decode::<RawStopBusesResponse>(json!({ "error": "no data" }));
        assert!(matches!(result, Err(ItranviasError::ParseError(_))));
    }

    #[test]
    fn test_first_matching_line_wins() {
        let snapshot = RawSnapshot {
            paradas: Vec::new(),
            lineas: vec![
                RawLine {
                    id: 10,
                    lin_comer: "first".to_string(),
                    color: String::new(),
                    nombre_orig: String::new(),
                    nombre_dest: String::new(),
                },
                RawLine {
                    id: 10,
                    lin_comer: "second".to_string(),
                    color: String::new(),
                    nombre_orig: String::new(),
                    nombre_dest: String::new(),
                },
            ],
        };
        assert_eq!(snapshot.line(10).unwrap().lin_comer, "first");
    }
}
