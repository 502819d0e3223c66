//! Discovered-device registry.
//!
//! Keyed by device id, so repeated advertisements never create duplicates.
//! The simulated entry is seeded at construction and survives every scan
//! restart.

use crate::domain::models::{Device, DeviceId};

#[derive(Debug)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            devices: vec![Device::simulated()],
        }
    }

    /// Insert or refresh one candidate. New entries keep discovery order.
    pub fn upsert(&mut self, device: Device) {
        if let Some(existing) = self.devices.iter_mut().find(|d| d.id == device.id) {
            *existing = device;
        } else {
            self.devices.push(device);
        }
    }

    /// Scan restart: drop previous results, keep the simulated entry.
    pub fn clear_discovered(&mut self) {
        self.devices.retain(|d| d.is_simulated);
    }

    pub fn get(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Presentation view: the simulated entry always passes, real devices
    /// need an exact name match against the configured filter.
    pub fn filtered(&self, filter: &str) -> Vec<Device> {
        self.devices
            .iter()
            .filter(|d| d.is_simulated || d.name == filter)
            .cloned()
            .collect()
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_advertisements_never_duplicate() {
        let mut registry = DeviceRegistry::new();
        for _ in 0..3 {
            registry.upsert(Device::new(DeviceId(1), "ESP32Roomba"));
            registry.upsert(Device::new(DeviceId(2), "other"));
        }
        assert_eq!(registry.devices().len(), 3); // simulated + two real
    }

    #[test]
    fn upsert_refreshes_the_name() {
        let mut registry = DeviceRegistry::new();
        registry.upsert(Device::new(DeviceId(1), "old"));
        registry.upsert(Device::new(DeviceId(1), "new"));
        assert_eq!(registry.get(DeviceId(1)).unwrap().name, "new");
    }

    #[test]
    fn clear_keeps_only_the_simulated_entry() {
        let mut registry = DeviceRegistry::new();
        registry.upsert(Device::new(DeviceId(1), "ESP32Roomba"));
        registry.clear_discovered();
        assert_eq!(registry.devices().len(), 1);
        assert!(registry.devices()[0].is_simulated);
    }

    #[test]
    fn filter_is_exact_match_plus_simulated() {
        let mut registry = DeviceRegistry::new();
        registry.upsert(Device::new(DeviceId(1), "ESP32Roomba"));
        registry.upsert(Device::new(DeviceId(2), "ESP32Roomba2"));
        registry.upsert(Device::new(DeviceId(3), "esp32roomba"));

        let visible = registry.filtered("ESP32Roomba");
        assert_eq!(visible.len(), 2);
        assert!(visible[0].is_simulated);
        assert_eq!(visible[1].id, DeviceId(1));
    }
}
