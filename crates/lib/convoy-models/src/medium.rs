use std::net::Ipv4Addr;

use log::debug;
use serde::Deserialize;

use convoy_core::agent::{AgentId, AgentKind};

use crate::error::AddressError;

/// Radio parameters shared by every device attached to the channel.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RadioSettings {
    pub phy_mode: String,
    pub tx_power_start: f64,
    pub tx_power_end: f64,
    pub tx_gain: f64,
    pub rx_gain: f64,
    pub energy_detection_threshold: f64,
    pub cca_mode1_threshold: f64,
    pub fragmentation_threshold: u32,
    pub rts_cts_threshold: u32,
}

impl Default for RadioSettings {
    fn default() -> Self {
        Self {
            phy_mode: "OfdmRate6MbpsBW10MHz".to_string(),
            tx_power_start: 32.0,
            tx_power_end: 32.0,
            tx_gain: 12.0,
            rx_gain: 12.0,
            energy_detection_threshold: -61.8,
            cca_mode1_threshold: -64.8,
            fragmentation_threshold: 2200,
            rts_cts_threshold: 2200,
        }
    }
}

impl RadioSettings {
    /// Broadcast frames use the unicast rate, so data, control and non-unicast modes all match.
    pub fn non_unicast_mode(&self) -> &str {
        &self.phy_mode
    }
}

/// Hands out host addresses of one IPv4 block in order, starting from host number 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPool {
    network: Ipv4Addr,
    mask: Ipv4Addr,
    next_host: u32,
}

impl AddressPool {
    pub fn new(network: Ipv4Addr, mask: Ipv4Addr) -> Result<Self, AddressError> {
        let mask_bits = u32::from(mask);
        if mask_bits.leading_ones() + mask_bits.trailing_zeros() != 32 {
            return Err(AddressError::InvalidMask(mask));
        }
        if u32::from(network) & !mask_bits != 0 {
            return Err(AddressError::InvalidNetwork { network, mask });
        }
        Ok(Self {
            network,
            mask,
            next_host: 1,
        })
    }

    /// Number of usable host addresses, leaving out the network and broadcast addresses.
    pub fn capacity(&self) -> u32 {
        (!u32::from(self.mask)).saturating_sub(1)
    }

    pub fn assign(&mut self) -> Result<Ipv4Addr, AddressError> {
        if self.next_host > self.capacity() {
            return Err(AddressError::Exhausted {
                network: self.network,
                mask: self.mask,
            });
        }
        let address = Ipv4Addr::from(u32::from(self.network) | self.next_host);
        self.next_host += 1;
        Ok(address)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetDevice {
    pub node: AgentId,
    pub kind: AgentKind,
    pub address: Ipv4Addr,
}

/// The single wireless channel of the scenario together with every device attached to it.
#[derive(Debug, Clone)]
pub struct SharedChannel {
    radio: RadioSettings,
    pool: AddressPool,
    devices: Vec<NetDevice>,
}

impl SharedChannel {
    pub fn new(radio: RadioSettings, pool: AddressPool) -> Self {
        Self {
            radio,
            pool,
            devices: Vec::new(),
        }
    }

    /// Attaches a device for `node` and gives it the next free address of the block.
    pub fn attach(&mut self, node: AgentId, kind: AgentKind) -> Result<NetDevice, AddressError> {
        let address = self.pool.assign()?;
        let device = NetDevice {
            node,
            kind,
            address,
        };
        debug!(
            "Attached {} {} to the channel as {} in mode {}",
            kind,
            node,
            address,
            self.radio.non_unicast_mode()
        );
        self.devices.push(device);
        Ok(device)
    }

    pub fn devices(&self) -> &[NetDevice] {
        &self.devices
    }

    pub fn device_of(&self, node: AgentId) -> Option<&NetDevice> {
        self.devices.iter().find(|device| device.node == node)
    }
}
