//! Built-in room layouts and the bounds-checked grid they are parsed into.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width, in cells, of every built-in layout.
pub const MAP_WIDTH: i32 = 40;
/// Height, in cells, of every built-in layout.
pub const MAP_HEIGHT: i32 = 20;

const WALL_GLYPH: char = '#';
const FLOOR_GLYPH: char = ' ';

/// Errors raised while building the compiled-in map catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("{map}: expected {expected} rows, found {found}")]
    RowCount {
        map: MapId,
        expected: usize,
        found: usize,
    },
    #[error("{map}: row {row} is {found} cells wide, expected {expected}")]
    RowWidth {
        map: MapId,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{map}: {zone} anchor ({x}, {y}) is out of bounds or on a wall")]
    BlockedAnchor {
        map: MapId,
        zone: &'static str,
        x: i32,
        y: i32,
    },
    #[error("{map}: bed zone or hide zone extends past the grid")]
    ZoneOutOfBounds { map: MapId },
    #[error("{map}: hide zone cannot be reached from the bed")]
    HideZoneUnreachable { map: MapId },
    #[error("unknown map `{0}` (expected 1-3, europe-us, vienna-hotel or japan)")]
    UnknownMap(String),
}

/// Integer grid coordinate. `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Taxicab distance between two cells.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Axis-aligned rectangle, half-open on the right and bottom edges.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Every cell covered by the rectangle, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Point::new(x, y)))
    }
}

/// One of the four orthogonal movement directions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }

    /// Uniformly random direction.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Terrain {
    Wall,
    Floor,
    /// Furniture or a label painted on the floor; walkable.
    Decor(char),
}

impl Terrain {
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Self {
        match glyph {
            WALL_GLYPH => Self::Wall,
            FLOOR_GLYPH => Self::Floor,
            other => Self::Decor(other),
        }
    }

    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => WALL_GLYPH,
            Self::Floor => FLOOR_GLYPH,
            Self::Decor(glyph) => glyph,
        }
    }

    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Identifier of a built-in map.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MapId {
    #[default]
    EuropeUs,
    ViennaHotel,
    Japan,
}

impl MapId {
    pub const ALL: [Self; 3] = [Self::EuropeUs, Self::ViennaHotel, Self::Japan];

    /// Map picked by a numeric selector on the map selection screen (1-based).
    #[must_use]
    pub const fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            1 => Some(Self::EuropeUs),
            2 => Some(Self::ViennaHotel),
            3 => Some(Self::Japan),
            _ => None,
        }
    }

    #[must_use]
    pub const fn selector(self) -> u8 {
        match self {
            Self::EuropeUs => 1,
            Self::ViennaHotel => 2,
            Self::Japan => 3,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EuropeUs => "Western Bedroom",
            Self::ViennaHotel => "Vienna Art Hotel",
            Self::Japan => "Japanese Washitsu",
        }
    }

    /// Where the player is told to hide when a parent shows up.
    #[must_use]
    pub const fn hide_hint(self) -> &'static str {
        match self {
            Self::EuropeUs | Self::Japan => "the study corner",
            Self::ViennaHotel => "the TV armchair",
        }
    }

    const fn slug(self) -> &'static str {
        match self {
            Self::EuropeUs => "europe-us",
            Self::ViennaHotel => "vienna-hotel",
            Self::Japan => "japan",
        }
    }

    const fn index(self) -> usize {
        self.selector() as usize - 1
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for MapId {
    type Err = MapError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.slug() == needle || id.selector().to_string() == needle)
            .ok_or_else(|| MapError::UnknownMap(raw.to_string()))
    }
}

/// Static description of a layout before it is parsed and validated.
struct Blueprint {
    id: MapId,
    rows: &'static [&'static str],
    bed: Point,
    hide: Rect,
}

const EUROPE_US: Blueprint = Blueprint {
    id: MapId::EuropeUs,
    rows: &[
        "########################################",
        "#      +                     =         #",
        "#                                      #",
        "#  ###########       ##############    #",
        "#  # pillow  #       #   study    #    #",
        "#  #[bed]    #       #   [desk]   #    #",
        "#  # /   \\   #       #   chair    #    #",
        "#  ####  #####       #####  #######    #",
        "#                                      #",
        "#             wardrobe                 #",
        "#                                      #",
        "#                                      #",
        "#   ####                     ####      #",
        "#   #  #      rug            #  #      #",
        "#   ####                     ####      #",
        "#                                      #",
        "#          shelf        lamp           #",
        "#                                      #",
        "#                                      #",
        "########################################",
    ],
    bed: Point::new(5, 5),
    hide: Rect::new(25, 8, 8, 4),
};

const VIENNA_HOTEL: Blueprint = Blueprint {
    id: MapId::ViennaHotel,
    rows: &[
        "########################################",
        "#   suite - vienna art hotel           #",
        "#                                      #",
        "#    #######     #####        #####    #",
        "#    # bed #     #art#        # tv#    #",
        "#    #     #     #   #        #   #    #",
        "#    # ( ) #     ## ##        ## ##    #",
        "#    #     #                           #",
        "#    ###  ##                           #",
        "#                                      #",
        "#      bath              balcony       #",
        "#                   armchair           #",
        "#                                      #",
        "#                                      #",
        "#    ######                 ######     #",
        "#    #    #     minibar     #    #     #",
        "#    ## ###                 ### ##     #",
        "#                                      #",
        "#                                      #",
        "########################################",
    ],
    bed: Point::new(8, 6),
    hide: Rect::new(20, 10, 6, 3),
};

const JAPAN: Blueprint = Blueprint {
    id: MapId::Japan,
    rows: &[
        "########################################",
        "#    washitsu - shoji and tatami       #",
        "#                                      #",
        "#   #####            #####             #",
        "#   #   #            #   #             #",
        "#   #   #            #   #             #",
        "#   ## ##            ## ##             #",
        "#                                      #",
        "#   futon                              #",
        "#                       desk  chair    #",
        "#                                      #",
        "#                                      #",
        "#    oshiire              tokonoma     #",
        "#                                      #",
        "#   ########            ########       #",
        "#   #      #            #      #       #",
        "#   ###  ###            ###  ###       #",
        "#                                      #",
        "#                                      #",
        "########################################",
    ],
    bed: Point::new(6, 8),
    hide: Rect::new(26, 7, 8, 4),
};

/// Immutable, validated room layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    id: MapId,
    width: i32,
    height: i32,
    cells: Vec<Terrain>,
    bed: Point,
    hide: Rect,
}

impl GridMap {
    fn from_blueprint(blueprint: &Blueprint) -> Result<Self, MapError> {
        let map = blueprint.id;
        let expected_rows = MAP_HEIGHT as usize;
        let expected_width = MAP_WIDTH as usize;
        if blueprint.rows.len() != expected_rows {
            return Err(MapError::RowCount {
                map,
                expected: expected_rows,
                found: blueprint.rows.len(),
            });
        }

        let mut cells = Vec::with_capacity(expected_rows * expected_width);
        for (row, line) in blueprint.rows.iter().enumerate() {
            let found = line.chars().count();
            if found != expected_width {
                return Err(MapError::RowWidth {
                    map,
                    row,
                    expected: expected_width,
                    found,
                });
            }
            cells.extend(line.chars().map(Terrain::from_glyph));
        }

        let grid = Self {
            id: map,
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            cells,
            bed: blueprint.bed,
            hide: blueprint.hide,
        };
        grid.validate_zones()?;
        Ok(grid)
    }

    fn validate_zones(&self) -> Result<(), MapError> {
        let map = self.id;
        for (zone, anchor) in [("bed", self.bed), ("hide", self.hide.origin())] {
            if !self.is_walkable(anchor) {
                return Err(MapError::BlockedAnchor {
                    map,
                    zone,
                    x: anchor.x,
                    y: anchor.y,
                });
            }
        }
        let hide_fits = self.hide.width > 0
            && self.hide.height > 0
            && self.contains(self.hide.origin())
            && self.contains(Point::new(
                self.hide.x + self.hide.width - 1,
                self.hide.y + self.hide.height - 1,
            ));
        let bed_fits = self.contains(Point::new(self.bed.x - 1, self.bed.y - 1))
            && self.contains(Point::new(self.bed.x + 1, self.bed.y + 1));
        if !hide_fits || !bed_fits {
            return Err(MapError::ZoneOutOfBounds { map });
        }
        if !self.reachable(self.bed, self.hide.origin()) {
            return Err(MapError::HideZoneUnreachable { map });
        }
        Ok(())
    }

    #[must_use]
    pub const fn id(&self) -> MapId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.id.name()
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Anchor of the 3×3 bed zone; also the player's spawn cell.
    #[must_use]
    pub const fn bed_anchor(&self) -> Point {
        self.bed
    }

    #[must_use]
    pub const fn hide_zone(&self) -> Rect {
        self.hide
    }

    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= 0 && point.y >= 0 && point.x < self.width && point.y < self.height
    }

    /// Terrain at `(x, y)`. Anything outside the grid reads as a wall.
    #[must_use]
    pub fn cell_at(&self, x: i32, y: i32) -> Terrain {
        if !self.contains(Point::new(x, y)) {
            return Terrain::Wall;
        }
        self.cells[(y * self.width + x) as usize]
    }

    #[must_use]
    pub fn is_walkable(&self, point: Point) -> bool {
        self.cell_at(point.x, point.y).is_walkable()
    }

    #[must_use]
    pub const fn in_hide_zone(&self, point: Point) -> bool {
        self.hide.contains(point)
    }

    /// Whether `point` lies in the 3×3 block centred on the bed anchor.
    #[must_use]
    pub const fn in_bed_zone(&self, point: Point) -> bool {
        point.x.abs_diff(self.bed.x) <= 1 && point.y.abs_diff(self.bed.y) <= 1
    }

    /// Uniformly random in-bounds cell (walls included).
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }

    /// Breadth-first search over walkable cells.
    #[must_use]
    pub fn reachable(&self, from: Point, to: Point) -> bool {
        if !self.is_walkable(from) || !self.is_walkable(to) {
            return false;
        }
        let mut visited = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);
        while let Some(cell) = queue.pop_front() {
            if cell == to {
                return true;
            }
            for direction in Direction::ALL {
                let next = cell.step(direction);
                if self.is_walkable(next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }
}

/// Catalog of the three compiled-in maps.
#[derive(Debug, Clone)]
pub struct MapRegistry {
    maps: [GridMap; 3],
}

impl MapRegistry {
    /// Parse and validate every built-in layout.
    pub fn builtin() -> Result<Self, MapError> {
        Ok(Self {
            maps: [
                GridMap::from_blueprint(&EUROPE_US)?,
                GridMap::from_blueprint(&VIENNA_HOTEL)?,
                GridMap::from_blueprint(&JAPAN)?,
            ],
        })
    }

    #[must_use]
    pub fn get(&self, id: MapId) -> &GridMap {
        &self.maps[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridMap> {
        self.maps.iter()
    }
}
