// UNKNOWN accessiblity
const UNKNOWN: i8 = -1;

// FOOT_FORBIDDEN that no pedestrian is allowed
const FOOT_FORBIDDEN: i8 = 0;
// FOOT_ALLOWED pedestrians are allowed in both directions
const FOOT_ALLOWED: i8 = 1;
// FOOT_DESIGNATED the way is signed for pedestrians http://wiki.openstreetmap.org/wiki/Tag:foot%3Ddesignated
const FOOT_DESIGNATED: i8 = 2;

// ACCESS_FORBIDDEN general access is not allowed, e.g. access=private
const ACCESS_FORBIDDEN: i8 = 0;
// ACCESS_ALLOWED general access is allowed
const ACCESS_ALLOWED: i8 = 1;

/// Class of the way derived from the `highway` tag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WayKind {
    // Not a highway, or a highway which is not usable (construction, proposed, ...)
    Unknown,
    // path, footway, track, bridleway, steps, pedestrian
    Trail,
    // roads shared with cars
    Street,
    // cycleways are only walkable with explicit foot access
    Cycleway,
    // motorways and trunks
    Motorway,
}

/// Which ways end up in the walking network
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WayFilter {
    // Every way a pedestrian may use
    Walkable,
    // Only trails, no streets
    Trails,
}

// WayProperties contains how a pedestrian can use the way
#[derive(Clone, Copy, Debug)]
pub struct WayProperties {
    pub foot: i8,
    pub access: i8,
    pub kind: WayKind,
    pub area: bool,
}

impl Default for WayProperties {
    fn default() -> WayProperties {
        WayProperties {
            foot: UNKNOWN,
            access: UNKNOWN,
            kind: WayKind::Unknown,
            area: false,
        }
    }
}

impl WayProperties {
    // Normalize fills UNKNOWN fields
    pub fn normalize(&mut self) {
        if self.access == UNKNOWN {
            self.access = ACCESS_ALLOWED;
        }
        if self.foot == UNKNOWN {
            self.foot = match self.kind {
                WayKind::Trail | WayKind::Street if self.access != ACCESS_FORBIDDEN => FOOT_ALLOWED,
                _ => FOOT_FORBIDDEN,
            };
        }
    }

    // Accessible means that pedestrians can use the way and the filter keeps it
    pub fn accessible(self, filter: WayFilter) -> bool {
        if self.area || self.kind == WayKind::Unknown || self.foot == FOOT_FORBIDDEN {
            return false;
        }
        match filter {
            WayFilter::Walkable => true,
            WayFilter::Trails => self.kind == WayKind::Trail,
        }
    }

    pub fn update(&mut self, key: &str, val: &str) {
        match key {
            "highway" => match val {
                "path" | "footway" | "track" | "bridleway" | "steps" | "pedestrian" => {
                    self.kind = WayKind::Trail;
                }
                "primary" | "primary_link" | "secondary" | "secondary_link" | "tertiary"
                | "tertiary_link" | "unclassified" | "residential" | "living_street" | "road"
                | "service" => {
                    self.kind = WayKind::Street;
                }
                "cycleway" => self.kind = WayKind::Cycleway,
                "motorway" | "motorway_link" | "trunk" | "trunk_link" => {
                    self.kind = WayKind::Motorway;
                }
                _ => self.kind = WayKind::Unknown,
            },
            "foot" => match val {
                "no" | "private" | "use_sidepath" => self.foot = FOOT_FORBIDDEN,
                "designated" => self.foot = FOOT_DESIGNATED,
                _ => self.foot = FOOT_ALLOWED,
            },
            "access" => match val {
                "no" | "private" => self.access = ACCESS_FORBIDDEN,
                _ => self.access = ACCESS_ALLOWED,
            },
            // https://wiki.openstreetmap.org/wiki/Key:service
            "service" => {
                if val == "private" {
                    self.access = ACCESS_FORBIDDEN;
                }
            }
            // Pedestrian squares are areas, walking around their outline is not a trail
            "area" => self.area = val == "yes",
            _ => {}
        }
    }
}

#[test]
fn test_accessible() {
    let mut p = WayProperties::default();
    p.normalize();
    assert!(!p.accessible(WayFilter::Walkable));

    p.kind = WayKind::Trail;
    p.foot = FOOT_ALLOWED;
    assert!(p.accessible(WayFilter::Walkable));
    assert!(p.accessible(WayFilter::Trails));

    p.kind = WayKind::Street;
    assert!(p.accessible(WayFilter::Walkable));
    assert!(!p.accessible(WayFilter::Trails));

    p.area = true;
    assert!(!p.accessible(WayFilter::Walkable));
}

#[test]
fn test_normalize() {
    let mut p = WayProperties::default();
    p.kind = WayKind::Trail;
    p.normalize();
    assert_eq!(FOOT_ALLOWED, p.foot);
    assert_eq!(ACCESS_ALLOWED, p.access);

    let mut p = WayProperties::default();
    p.kind = WayKind::Street;
    p.access = ACCESS_FORBIDDEN;
    p.normalize();
    assert_eq!(FOOT_FORBIDDEN, p.foot);

    let mut p = WayProperties::default();
    p.kind = WayKind::Motorway;
    p.normalize();
    assert_eq!(FOOT_FORBIDDEN, p.foot);

    let mut p = WayProperties::default();
    p.kind = WayKind::Cycleway;
    p.foot = FOOT_DESIGNATED;
    p.normalize();
    assert_eq!(FOOT_DESIGNATED, p.foot);
    assert!(p.accessible(WayFilter::Walkable));
}

#[test]
fn test_update() {
    let mut p = WayProperties::default();
    p.update("highway", "footway");
    assert_eq!(WayKind::Trail, p.kind);

    p.update("highway", "track");
    assert_eq!(WayKind::Trail, p.kind);

    p.update("highway", "residential");
    assert_eq!(WayKind::Street, p.kind);

    p.update("highway", "cycleway");
    assert_eq!(WayKind::Cycleway, p.kind);

    p.update("highway", "trunk");
    assert_eq!(WayKind::Motorway, p.kind);

    p.update("highway", "construction");
    assert_eq!(WayKind::Unknown, p.kind);

    p.update("foot", "designated");
    assert_eq!(FOOT_DESIGNATED, p.foot);

    p.update("foot", "yes");
    assert_eq!(FOOT_ALLOWED, p.foot);

    p.update("foot", "no");
    assert_eq!(FOOT_FORBIDDEN, p.foot);

    p.update("access", "private");
    assert_eq!(ACCESS_FORBIDDEN, p.access);

    p.update("access", "permissive");
    assert_eq!(ACCESS_ALLOWED, p.access);

    p.update("service", "private");
    assert_eq!(ACCESS_FORBIDDEN, p.access);

    p.update("area", "yes");
    assert!(p.area);
}

#[test]
fn test_private_trail_with_foot_access() {
    let mut p = WayProperties::default();
    p.update("highway", "path");
    p.update("access", "private");
    p.update("foot", "permissive");
    p.normalize();
    assert!(p.accessible(WayFilter::Trails));

    let mut p = WayProperties::default();
    p.update("highway", "path");
    p.update("access", "no");
    p.normalize();
    assert!(!p.accessible(WayFilter::Walkable));
}
