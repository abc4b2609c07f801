//! Fixed vocabulary of topology relationships.

use crate::error::TopologyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! edge_types {
    ($($variant:ident => $wire:literal),+ $(,)?) => {
        /// Relationship type of a [`Reference`](crate::Reference).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum EdgeType {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl EdgeType {
            pub const ALL: &'static [EdgeType] = &[$(EdgeType::$variant,)+];

            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(EdgeType::$variant => $wire,)+
                }
            }
        }

        impl FromStr for EdgeType {
            type Err = TopologyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(EdgeType::$variant),)+
                    other => Err(TopologyError::UnknownEdgeType(other.to_string())),
                }
            }
        }
    };
}

edge_types! {
    // Aggregation
    Contains => "contains",
    Federates => "federates",
    Members => "members",
    // Association
    AliasOf => "aliasOf",
    AssignedTo => "assignedTo",
    AttachedTo => "attachedTo",
    Classifies => "classifies",
    Configures => "configures",
    DeployedTo => "deployedTo",
    Exposes => "exposes",
    Has => "has",
    Implements => "implements",
    LocatedAt => "locatedAt",
    Manages => "manages",
    Monitors => "monitors",
    MovedTo => "movedTo",
    Origin => "origin",
    Owns => "owns",
    Rates => "rates",
    ResolvesTo => "resolvesTo",
    Realizes => "realizes",
    Segregates => "segregates",
    Uses => "uses",
    // Data flow
    AccessedVia => "accessedVia",
    BindsTo => "bindsTo",
    CommunicatesWith => "communicatesWith",
    ConnectedTo => "connectedTo",
    DownlinkTo => "downlinkTo",
    ReachableVia => "reachableVia",
    Receives => "receives",
    Routes => "routes",
    RoutesVia => "routesVia",
    LoadBalances => "loadBalances",
    Resolved => "resolved",
    Resolves => "resolves",
    Sends => "sends",
    Traverses => "traverses",
    UplinkTo => "uplinkTo",
    // Dependency
    DependsOn => "dependsOn",
    RunsOn => "runsOn",
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
