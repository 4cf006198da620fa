// TspCore: Euclidean TSP instances and tours written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use pretty_assertions::assert_eq;
use rand::prelude::*;

use crate::instance::{CostKind, Instance, WeightKind};
use crate::tour::Tour;
use crate::tsplib::{
    parse_instance_str, parse_tour_str, render_instance, render_tour,
};
use crate::types::TspError;

const SQUARE: &str = "\
NAME : square4
COMMENT : unit square
TYPE : TSP
DIMENSION : 4
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0.0 0.0
2 1.0 0.0
3 1.0 1.0
4 0.0 1.0
EOF
";

const EXPLICIT: &str = "\
NAME : exp3
TYPE : TSP
DIMENSION : 3
EDGE_WEIGHT_TYPE : EXPLICIT
EDGE_WEIGHT_FORMAT : LOWER_DIAG_ROW
EDGE_WEIGHT_SECTION
0
3 0
4 5 0
EOF
";

const OPT_TOUR: &str = "\
NAME : square4.opt.tour
TYPE : TOUR
DIMENSION : 4
TOUR_SECTION
1
2
3
4
-1
EOF
";

#[test]
fn parse_a_coordinate_instance() {
    let inst = parse_instance_str(SQUARE, "fallback", CostKind::Real).unwrap();
    assert_eq!(inst.name(), "square4");
    assert_eq!(inst.comment(), Some("unit square"));
    assert_eq!(inst.num_nodes(), 4);
    assert_eq!(inst.weight_kind(), WeightKind::Euc2d);
    assert_eq!(inst.dist(0, 1), 1.0);
    assert_eq!(inst.dist(0, 2), 2.0_f64.sqrt());
}

#[test]
fn parse_an_explicit_instance() {
    let inst = parse_instance_str(EXPLICIT, "fallback", CostKind::Real).unwrap();
    assert_eq!(inst.num_nodes(), 3);
    assert_eq!(inst.weight_kind(), WeightKind::Explicit);
    assert_eq!(inst.dist(2, 0), 4.0);
    assert_eq!(inst.dist(1, 2), 5.0);
}

#[test]
fn parse_a_tour_file() {
    let tour = parse_tour_str(OPT_TOUR, 4).unwrap();
    assert_eq!(tour.order(), vec![0, 1, 2, 3]);
}

#[test]
fn instance_round_trip() {
    let mut rng = StdRng::seed_from_u64(23);
    let inst = Instance::random_uniform("roundtrip", 12, 50.0, &mut rng).unwrap();
    let rendered = render_instance(&inst);
    let back = parse_instance_str(&rendered, "x", CostKind::Real).unwrap();
    assert_eq!(back.name(), inst.name());
    assert_eq!(back.num_nodes(), inst.num_nodes());
    for (a, b) in back.nodes().iter().zip(inst.nodes()) {
        assert_eq!(a, b);
    }
}

#[test]
fn tour_round_trip() {
    let mut rng = StdRng::seed_from_u64(29);
    let tour = Tour::random(9, &mut rng);
    let rendered = render_tour("t9", &tour);
    let back = parse_tour_str(&rendered, 9).unwrap();
    assert_eq!(back, tour);
}

#[test]
fn dimension_must_come_before_the_nodes() {
    let text = "\
TYPE : TSP
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0.0 0.0
EOF
";
    assert!(matches!(
        parse_instance_str(text, "x", CostKind::Real),
        Err(TspError::InvalidInput(_))
    ));
}

#[test]
fn non_monotonic_node_indices_are_rejected() {
    let text = "\
TYPE : TSP
DIMENSION : 2
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0.0 0.0
3 1.0 1.0
EOF
";
    assert!(matches!(
        parse_instance_str(text, "x", CostKind::Real),
        Err(TspError::InvalidInput(_))
    ));
}

#[test]
fn unknown_weight_types_are_rejected() {
    let text = "TYPE : TSP\nDIMENSION : 2\nEDGE_WEIGHT_TYPE : CEIL_2D\nEOF\n";
    assert!(matches!(
        parse_instance_str(text, "x", CostKind::Real),
        Err(TspError::InvalidInput(_))
    ));
}

#[test]
fn missing_coordinates_are_an_illegal_metric() {
    let text = "TYPE : TSP\nDIMENSION : 2\nEDGE_WEIGHT_TYPE : EUC_2D\nEOF\n";
    assert!(matches!(
        parse_instance_str(text, "x", CostKind::Real),
        Err(TspError::IllegalMetric(_))
    ));
}

#[test]
fn wrong_type_is_rejected() {
    let text = "TYPE : ATSP\nDIMENSION : 2\nEOF\n";
    assert!(matches!(
        parse_instance_str(text, "x", CostKind::Real),
        Err(TspError::InvalidInput(_))
    ));
    assert!(matches!(
        parse_tour_str(SQUARE, 4),
        Err(TspError::InvalidInput(_))
    ));
}
