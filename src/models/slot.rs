use std::collections::HashSet;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ParkingSlot {
    pub id: String,
    pub number: u32,
    pub is_available: bool,
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct SlotCatalog {
    slots: Vec<ParkingSlot>,
}

#[derive(Deserialize)]
struct CatalogFile {
    slots: Vec<ParkingSlot>,
}

const DEFAULT_SLOTS: [(&str, u32, bool, f64); 12] = [
    ("A1", 1, true, 15.0),
    ("A2", 2, false, 15.0),
    ("A3", 3, true, 15.0),
    ("A4", 4, true, 15.0),
    ("B1", 5, true, 20.0),
    ("B2", 6, false, 20.0),
    ("B3", 7, true, 20.0),
    ("B4", 8, true, 20.0),
    ("C1", 9, true, 30.0),
    ("C2", 10, true, 30.0),
    ("C3", 11, false, 30.0),
    ("C4", 12, true, 30.0),
];

impl SlotCatalog {
    pub fn new(slots: Vec<ParkingSlot>) -> anyhow::Result<Self> {
        anyhow::ensure!(!slots.is_empty(), "slot catalog is empty");

        let mut ids = HashSet::new();
        let mut numbers = HashSet::new();
        for slot in &slots {
            anyhow::ensure!(
                !slot.id.trim().is_empty(),
                "slot #{} has an empty id",
                slot.number
            );
            anyhow::ensure!(ids.insert(slot.id.as_str()), "duplicate slot id: {}", slot.id);
            anyhow::ensure!(
                numbers.insert(slot.number),
                "duplicate slot number: {}",
                slot.number
            );
            anyhow::ensure!(
                slot.price.is_finite() && slot.price > 0.0,
                "slot {} has invalid price: {}",
                slot.id,
                slot.price
            );
        }

        Ok(Self { slots })
    }

    pub fn default_catalog() -> Self {
        let slots = DEFAULT_SLOTS
            .iter()
            .map(|&(id, number, is_available, price)| ParkingSlot {
                id: id.to_string(),
                number,
                is_available,
                price,
            })
            .collect();
        Self { slots }
    }

    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let file: CatalogFile = serde_json::from_str(s)?;
        Self::new(file.slots)
    }

    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read slot catalog {path}"))?;
                Self::from_json(&raw).with_context(|| format!("invalid slot catalog {path}"))
            }
            None => Ok(Self::default_catalog()),
        }
    }

    pub fn slots(&self) -> &[ParkingSlot] {
        &self.slots
    }

    pub fn get(&self, id: &str) -> Option<&ParkingSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn available_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_available).count()
    }

    pub fn price_tiers(&self) -> Vec<f64> {
        let mut tiers: Vec<f64> = Vec::new();
        for slot in &self.slots {
            if !tiers.contains(&slot.price) {
                tiers.push(slot.price);
            }
        }
        tiers.sort_by(|a, b| a.total_cmp(b));
        tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_layout() {
        let catalog = SlotCatalog::default_catalog();
        assert_eq!(catalog.slots().len(), 12);
        assert_eq!(catalog.available_count(), 9);
        assert_eq!(catalog.price_tiers(), vec![15.0, 20.0, 30.0]);
        assert!(SlotCatalog::new(catalog.slots().to_vec()).is_ok());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = SlotCatalog::default_catalog();
        let slot = catalog.get("C2").unwrap();
        assert_eq!(slot.number, 10);
        assert_eq!(slot.price, 30.0);
        assert!(catalog.get("Z9").is_none());
    }

    #[test]
    fn test_parse_valid_json() {
        let json = r#"{"slots":[{"id":"P1","number":1,"is_available":true,"price":5.5},{"id":"P2","number":2,"is_available":false,"price":8}]}"#;
        let catalog = SlotCatalog::from_json(json).unwrap();
        assert_eq!(catalog.slots().len(), 2);
        assert_eq!(catalog.get("P1").unwrap().price, 5.5);
        assert!(!catalog.get("P2").unwrap().is_available);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(SlotCatalog::from_json("not json").is_err());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(SlotCatalog::from_json(r#"{"slots":[]}"#).is_err());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"{"slots":[{"id":"P1","number":1,"is_available":true,"price":5},{"id":"P1","number":2,"is_available":true,"price":5}]}"#;
        let err = SlotCatalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate slot id"));
    }

    #[test]
    fn test_duplicate_number_rejected() {
        let json = r#"{"slots":[{"id":"P1","number":1,"is_available":true,"price":5},{"id":"P2","number":1,"is_available":true,"price":5}]}"#;
        assert!(SlotCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let json = r#"{"slots":[{"id":"P1","number":1,"is_available":true,"price":0}]}"#;
        assert!(SlotCatalog::from_json(json).is_err());
        let json = r#"{"slots":[{"id":"P1","number":1,"is_available":true,"price":-3}]}"#;
        assert!(SlotCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_load_without_path_uses_default() {
        let catalog = SlotCatalog::load(None).unwrap();
        assert_eq!(catalog.slots().len(), 12);
    }

    #[test]
    fn test_load_example_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/slots.example.json");
        let catalog = SlotCatalog::load(Some(path)).unwrap();
        let ids: Vec<&str> = catalog.slots().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2", "B1", "C1"]);
        assert_eq!(catalog.price_tiers(), vec![15.0, 20.0, 30.0]);
        assert_eq!(catalog.available_count(), 3);
        assert_eq!(catalog.get("C1").unwrap().number, 4);
    }

    #[test]
    fn test_load_invalid_file_names_path() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
        let err = SlotCatalog::load(Some(path)).unwrap_err();
        assert!(err.to_string().contains("invalid slot catalog"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SlotCatalog::load(Some("/nonexistent/slots.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/slots.json"));
    }
}
