/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Coarse legacy network categories used by priority-list selection.

use crate::model::capabilities::{Capability, Transport};
use crate::model::network_request::CapabilityFilter;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Legacy network type, ordered by the caller into a preference list.
///
/// Numeric codes follow the platform's historical connectivity type values.
/// Codes without a named variant are carried as [`LegacyType::Other`] and have no
/// transport mapping.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyType {
    Mobile,
    Wifi,
    MobileDun,
    MobileHipri,
    Bluetooth,
    Ethernet,
    Vpn,
    Other(i32),
}

/// A legacy type with no transport mapping.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnmappedLegacyType(pub LegacyType);

impl Display for UnmappedLegacyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "no capability mapping for legacy type: {}", self.0)
    }
}

impl Error for UnmappedLegacyType {}

impl LegacyType {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => LegacyType::Mobile,
            1 => LegacyType::Wifi,
            4 => LegacyType::MobileDun,
            5 => LegacyType::MobileHipri,
            7 => LegacyType::Bluetooth,
            9 => LegacyType::Ethernet,
            17 => LegacyType::Vpn,
            other => LegacyType::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            LegacyType::Mobile => 0,
            LegacyType::Wifi => 1,
            LegacyType::MobileDun => 4,
            LegacyType::MobileHipri => 5,
            LegacyType::Bluetooth => 7,
            LegacyType::Ethernet => 9,
            LegacyType::Vpn => 17,
            LegacyType::Other(code) => *code,
        }
    }

    pub fn transport(&self) -> Option<Transport> {
        match self {
            LegacyType::Mobile | LegacyType::MobileDun | LegacyType::MobileHipri => {
                Some(Transport::Cellular)
            }
            LegacyType::Wifi => Some(Transport::Wifi),
            LegacyType::Bluetooth => Some(Transport::Bluetooth),
            LegacyType::Ethernet => Some(Transport::Ethernet),
            LegacyType::Vpn | LegacyType::Other(_) => None,
        }
    }

    /// Types whose selection means holding a mobile network request.
    pub fn is_mobile_request_type(&self) -> bool {
        matches!(self, LegacyType::MobileDun | LegacyType::MobileHipri)
    }

    /// Capability filter a network must satisfy to count as this type.
    ///
    /// Every mapped type requires `NotVpn`. DUN requires the DUN capability and
    /// forbids `NotRestricted`; every other type requires `Internet` and
    /// `NotRestricted`.
    pub fn capability_filter(&self) -> Result<CapabilityFilter, UnmappedLegacyType> {
        let transport = self.transport().ok_or(UnmappedLegacyType(*self))?;
        let filter = CapabilityFilter::new()
            .with_transport(transport)
            .require(Capability::NotVpn);

        if *self == LegacyType::MobileDun {
            Ok(filter
                .require(Capability::Dun)
                .forbid(Capability::NotRestricted))
        } else {
            Ok(filter
                .require(Capability::Internet)
                .require(Capability::NotRestricted))
        }
    }
}

impl Display for LegacyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LegacyType::Mobile => f.write_str("MOBILE"),
            LegacyType::Wifi => f.write_str("WIFI"),
            LegacyType::MobileDun => f.write_str("MOBILE_DUN"),
            LegacyType::MobileHipri => f.write_str("MOBILE_HIPRI"),
            LegacyType::Bluetooth => f.write_str("BLUETOOTH"),
            LegacyType::Ethernet => f.write_str("ETHERNET"),
            LegacyType::Vpn => f.write_str("VPN"),
            LegacyType::Other(code) => write!(f, "TYPE_{code}"),
        }
    }
}
