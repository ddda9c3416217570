use log::{info, warn};

use convoy_core::agent::{AgentId, AgentKind};
use convoy_models::error::ConfigError;
use convoy_models::medium::NetDevice;

/// Identity of one node. Vehicles take node IDs `0..N` and roadside units the IDs after them,
/// in creation order. `index` counts within the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInfo {
    pub node: AgentId,
    pub kind: AgentKind,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub vehicles: Vec<NodeInfo>,
    pub rsus: Vec<NodeInfo>,
}

impl Topology {
    pub fn build(vehicle_count: usize, rsu_count: usize) -> Result<Self, ConfigError> {
        if rsu_count == 0 {
            return Err(ConfigError::NoRoadsideUnit);
        }
        if vehicle_count == 0 {
            warn!("Building a topology without vehicles; no video session will run");
        }

        info!(
            "Creating {} vehicles and {} roadside units",
            vehicle_count, rsu_count
        );
        let vehicles = (0..vehicle_count)
            .map(|index| NodeInfo {
                node: AgentId::from(index as u64),
                kind: AgentKind::Vehicle,
                index,
            })
            .collect();
        let rsus = (0..rsu_count)
            .map(|index| NodeInfo {
                node: AgentId::from((vehicle_count + index) as u64),
                kind: AgentKind::RSU,
                index,
            })
            .collect();
        Ok(Self { vehicles, rsus })
    }

    pub fn node_count(&self) -> usize {
        self.vehicles.len() + self.rsus.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeInfo> {
        self.vehicles.iter().chain(self.rsus.iter())
    }
}

/// A vehicle after mobility and its network device have been attached.
#[derive(Debug, Clone)]
pub struct Vehicle<H> {
    pub info: NodeInfo,
    pub device: NetDevice,
    pub mobility: H,
}

#[derive(Debug, Clone)]
pub struct RoadsideUnit<H> {
    pub info: NodeInfo,
    pub device: NetDevice,
    pub mobility: H,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsus_follow_the_vehicles() {
        let topology = Topology::build(3, 2).unwrap();
        let ids: Vec<u64> = topology.nodes().map(|info| info.node.as_u64()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(topology.rsus[1].index, 1);
        assert_eq!(topology.rsus[1].kind, AgentKind::RSU);
        assert_eq!(topology.node_count(), 5);
    }

    #[test]
    fn a_roadside_unit_is_required() {
        assert_eq!(Topology::build(10, 0), Err(ConfigError::NoRoadsideUnit));
        assert!(Topology::build(0, 1).unwrap().vehicles.is_empty());
    }
}
