// Copyright (c) 2025 - Cowboy AI, Inc.
//! Lab Room Catalog
//!
//! Read-only reference data. Rooms are identified by their `id` string and
//! reservations refer to them by that id only; the catalog is never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workstation platform of a room (informational only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Windows,
    Mac,
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomType::Windows => write!(f, "windows"),
            RoomType::Mac => write!(f, "mac"),
        }
    }
}

/// Catalog entry for a bookable lab room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabRoom {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: u32,
}

const fn room(id: &'static str, name: &'static str, room_type: RoomType) -> LabRoom {
    LabRoom {
        id,
        name,
        room_type,
        capacity: 20,
    }
}

/// The fixed set of bookable rooms
pub static LAB_ROOMS: [LabRoom; 8] = [
    room("be-206", "Lab BE-206", RoomType::Windows),
    room("be-304", "Lab BE-304", RoomType::Windows),
    room("be-305", "Lab BE-305", RoomType::Windows),
    room("be-307", "Lab BE-307", RoomType::Windows),
    room("be-308", "Lab BE-308", RoomType::Windows),
    room("be-309", "Lab BE-309", RoomType::Windows),
    room("be-310", "Lab BE-310", RoomType::Windows),
    room("be-207", "iMac BE-207", RoomType::Mac),
];

/// Look up a room by id
pub fn find_room(id: &str) -> Option<&'static LabRoom> {
    LAB_ROOMS.iter().find(|room| room.id == id)
}
