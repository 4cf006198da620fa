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

//! Reading and writing the TSPLIB subset.
//!
//! Handled headers: `NAME`, `TYPE` (TSP or TOUR), `COMMENT`, `DIMENSION`, `EDGE_WEIGHT_TYPE`
//! (`EUC_2D`, `ATT`, `GEO`, `EXPLICIT`) and `EDGE_WEIGHT_FORMAT` (`LOWER_DIAG_ROW`). Handled
//! sections: `NODE_COORD_SECTION` / `DISPLAY_DATA_SECTION` (1-indexed, monotonic),
//! `EDGE_WEIGHT_SECTION` (whitespace-delimited, filling the lower triangle), `TOUR_SECTION`
//! (one node per line, `-1` terminated). `EOF` ends the file; unknown sections are skipped
//! with a warning, matching how permissive the classic readers are.

use std::fs;
use std::path::Path;

use itertools::Itertools;
use log::{debug, warn};

use crate::instance::{CostKind, Instance, Node, WeightKind};
use crate::tour::Tour;
use crate::types::{NodeId, TspError};

/// The headers and sections this reader knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Name,
    Type,
    Comment,
    Dimension,
    EdgeWeightType,
    EdgeWeightFormat,
    NodeCoordSection,
    DisplayDataSection,
    TourSection,
    EdgeWeightSection,
    EndOfFile,
    Unhandled,
}

/// Map a header keyword to its section.
fn section_of(keyword: &str) -> Section {
    match keyword {
        "NAME" => Section::Name,
        "TYPE" => Section::Type,
        "COMMENT" => Section::Comment,
        "DIMENSION" => Section::Dimension,
        "EDGE_WEIGHT_TYPE" => Section::EdgeWeightType,
        "EDGE_WEIGHT_FORMAT" => Section::EdgeWeightFormat,
        "NODE_COORD_SECTION" => Section::NodeCoordSection,
        "DISPLAY_DATA_SECTION" => Section::DisplayDataSection,
        "TOUR_SECTION" => Section::TourSection,
        "EDGE_WEIGHT_SECTION" => Section::EdgeWeightSection,
        "EOF" => Section::EndOfFile,
        _ => Section::Unhandled,
    }
}

/// Split a header line into its keyword and (possibly empty) parameter.
fn keyword_and_param(line: &str) -> (&str, &str) {
    match line.split_once(':') {
        Some((k, v)) => (k.trim(), v.trim()),
        None => (line.trim(), ""),
    }
}

/// Parse an instance from the contents of a `.tsp` file. `fallback_name` is used when the file
/// carries no `NAME` header; `cost` selects real or rounded-integer distances.
pub fn parse_instance_str(
    text: &str,
    fallback_name: &str,
    cost: CostKind,
) -> Result<Instance, TspError> {
    let lines: Vec<&str> = text.lines().collect();

    let mut name: Option<String> = None;
    let mut comment: Option<String> = None;
    let mut dimension: Option<usize> = None;
    let mut weight: Option<WeightKind> = None;
    let mut coords: Option<Vec<Node>> = None;
    let mut rows: Option<Vec<Vec<f64>>> = None;

    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx].trim();
        idx += 1;
        if line.is_empty() {
            continue;
        }
        let (keyword, param) = keyword_and_param(line);
        debug!("parsing |{keyword}| on |{param}|");

        match section_of(keyword) {
            Section::Name => name = Some(param.to_string()),
            Section::Comment => comment = Some(param.to_string()),
            Section::Type => {
                if param != "TSP" {
                    return Err(TspError::InvalidInput(format!(
                        "expected an instance of TYPE TSP, got {param}"
                    )));
                }
            }
            Section::Dimension => {
                dimension = Some(param.parse().map_err(|_| {
                    TspError::InvalidInput(format!("bad DIMENSION: {param}"))
                })?);
            }
            Section::EdgeWeightType => {
                weight = Some(match param {
                    "EUC_2D" => WeightKind::Euc2d,
                    "ATT" => WeightKind::Att,
                    "GEO" => WeightKind::Geo,
                    "EXPLICIT" => WeightKind::Explicit,
                    other => {
                        return Err(TspError::InvalidInput(format!(
                            "unhandled EDGE_WEIGHT_TYPE: {other}"
                        )))
                    }
                });
            }
            Section::EdgeWeightFormat => {
                if param != "LOWER_DIAG_ROW" {
                    return Err(TspError::InvalidInput(format!(
                        "unhandled EDGE_WEIGHT_FORMAT: {param}"
                    )));
                }
            }
            Section::NodeCoordSection | Section::DisplayDataSection => {
                let n = dimension.ok_or_else(|| {
                    TspError::InvalidInput(
                        "DIMENSION must come before the list of nodes".to_string(),
                    )
                })?;
                let mut nodes = Vec::with_capacity(n);
                for i in 1..=n {
                    let line = *lines.get(idx).ok_or_else(|| {
                        TspError::InvalidInput("reached EOF while reading nodes".to_string())
                    })?;
                    idx += 1;
                    let mut fields = line.split_whitespace();
                    let node_idx: usize = fields
                        .next()
                        .and_then(|f| f.parse().ok())
                        .ok_or_else(|| bad_record("node", line))?;
                    let x: f64 = fields
                        .next()
                        .and_then(|f| f.parse().ok())
                        .ok_or_else(|| bad_record("node", line))?;
                    let y: f64 = fields
                        .next()
                        .and_then(|f| f.parse().ok())
                        .ok_or_else(|| bad_record("node", line))?;
                    if node_idx != i {
                        return Err(TspError::InvalidInput(format!(
                            "incoherent node indexing: expected {i}, got {node_idx}"
                        )));
                    }
                    nodes.push(Node { x, y });
                }
                coords = Some(nodes);
            }
            Section::EdgeWeightSection => {
                let n = dimension.ok_or_else(|| {
                    TspError::InvalidInput(
                        "DIMENSION must come before the weight section".to_string(),
                    )
                })?;
                let num_weights = n * (n + 1) / 2;
                let mut weights = Vec::with_capacity(num_weights);
                while weights.len() < num_weights {
                    let line = *lines.get(idx).ok_or_else(|| {
                        TspError::InvalidInput("reached EOF while reading weights".to_string())
                    })?;
                    idx += 1;
                    for field in line.split_whitespace() {
                        let w: f64 =
                            field.parse().map_err(|_| bad_record("weight", line))?;
                        weights.push(w);
                    }
                }
                if weights.len() != num_weights {
                    return Err(TspError::InvalidInput(format!(
                        "expected {} weights, got {}",
                        num_weights,
                        weights.len()
                    )));
                }
                let mut it = weights.into_iter();
                rows = Some(
                    (0..n)
                        .map(|i| (0..=i).map(|_| it.next().unwrap_or(0.0)).collect())
                        .collect(),
                );
            }
            Section::TourSection => {
                warn!("section TOUR_SECTION unmanaged in an instance file");
                while idx < lines.len() && lines[idx].trim() != "-1" {
                    idx += 1;
                }
            }
            Section::EndOfFile => break,
            Section::Unhandled => warn!("section {keyword} unmanaged"),
        }
    }

    let n = dimension.ok_or_else(|| TspError::InvalidInput("missing DIMENSION".to_string()))?;
    let weight = weight
        .ok_or_else(|| TspError::InvalidInput("missing EDGE_WEIGHT_TYPE".to_string()))?;
    let name = name.unwrap_or_else(|| fallback_name.to_string());

    let mut inst = match weight {
        WeightKind::Explicit => {
            let rows = rows.ok_or_else(|| TspError::IllegalMetric(weight.to_string()))?;
            if rows.len() != n {
                return Err(TspError::InvalidInput(format!(
                    "weight section does not match DIMENSION {n}"
                )));
            }
            Instance::explicit(name, rows, coords)?
        }
        _ => {
            let coords = coords.ok_or_else(|| TspError::IllegalMetric(weight.to_string()))?;
            Instance::new(name, coords, weight, cost)?
        }
    };
    if let Some(comment) = comment {
        inst.set_comment(comment);
    }
    Ok(inst)
}

/// Parse an instance from a `.tsp` file on disk. The file stem is the fallback name.
pub fn parse_instance(path: &Path, cost: CostKind) -> Result<Instance, TspError> {
    let text = fs::read_to_string(path)?;
    let fallback = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "unnamed".to_string());
    parse_instance_str(&text, &fallback, cost)
}

/// Parse a `.tour` file (e.g. a known optimal tour) over `n` nodes.
pub fn parse_tour_str(text: &str, n: usize) -> Result<Tour, TspError> {
    let lines: Vec<&str> = text.lines().collect();

    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx].trim();
        idx += 1;
        if line.is_empty() {
            continue;
        }
        let (keyword, param) = keyword_and_param(line);
        match section_of(keyword) {
            Section::Type => {
                if param != "TOUR" {
                    return Err(TspError::InvalidInput(format!(
                        "expected a file of TYPE TOUR, got {param}"
                    )));
                }
            }
            Section::Dimension => {
                let d: usize = param
                    .parse()
                    .map_err(|_| TspError::InvalidInput(format!("bad DIMENSION: {param}")))?;
                if d != n {
                    return Err(TspError::InvalidInput(format!(
                        "tour DIMENSION {d} does not match the instance ({n})"
                    )));
                }
            }
            Section::TourSection => {
                let mut order: Vec<NodeId> = Vec::with_capacity(n);
                loop {
                    let line = lines.get(idx).map(|l| l.trim()).ok_or_else(|| {
                        TspError::InvalidInput("reached EOF while reading the tour".to_string())
                    })?;
                    idx += 1;
                    if line == "-1" {
                        break;
                    }
                    let node: usize =
                        line.parse().map_err(|_| bad_record("tour node", line))?;
                    if node < 1 || node > n {
                        return Err(TspError::InvalidInput(format!(
                            "tour node {node} out of range 1..={n}"
                        )));
                    }
                    order.push(node - 1);
                }
                if order.len() != n || !order.iter().all_unique() {
                    return Err(TspError::Infeasible);
                }
                return Ok(Tour::from_order(&order));
            }
            Section::EndOfFile => break,
            _ => {}
        }
    }
    Err(TspError::InvalidInput(
        "file contains no TOUR_SECTION".to_string(),
    ))
}

/// Parse a `.tour` file on disk.
pub fn parse_tour(path: &Path, n: usize) -> Result<Tour, TspError> {
    parse_tour_str(&fs::read_to_string(path)?, n)
}

/// Render an instance in TSPLIB format.
pub fn render_instance(inst: &Instance) -> String {
    let mut out = String::new();
    out.push_str(&format!("NAME : {}\n", inst.name()));
    if let Some(comment) = inst.comment() {
        out.push_str(&format!("COMMENT : {comment}\n"));
    }
    out.push_str("TYPE : TSP\n");
    out.push_str(&format!("DIMENSION : {}\n", inst.num_nodes()));
    out.push_str(&format!("EDGE_WEIGHT_TYPE : {}\n", inst.weight_kind()));
    if inst.weight_kind() == WeightKind::Explicit {
        out.push_str("EDGE_WEIGHT_FORMAT : LOWER_DIAG_ROW\n");
        out.push_str("EDGE_WEIGHT_SECTION\n");
        let d = inst.distances();
        for i in 0..inst.num_nodes() {
            out.push_str(&format!(
                "{}\n",
                (0..=i).map(|j| d.dist(i, j)).format(" ")
            ));
        }
    }
    if !inst.nodes().is_empty() {
        out.push_str("NODE_COORD_SECTION\n");
        for (i, node) in inst.nodes().iter().enumerate() {
            out.push_str(&format!("{} {} {}\n", i + 1, node.x, node.y));
        }
    }
    out.push_str("EOF\n");
    out
}

/// Write an instance to a `.tsp` file.
pub fn write_instance(path: &Path, inst: &Instance) -> Result<(), TspError> {
    fs::write(path, render_instance(inst))?;
    Ok(())
}

/// Render a tour in TSPLIB format (1-indexed, `-1` terminated).
pub fn render_tour(name: &str, tour: &Tour) -> String {
    let mut out = String::new();
    out.push_str(&format!("NAME : {name}\n"));
    out.push_str("TYPE : TOUR\n");
    out.push_str(&format!("DIMENSION : {}\n", tour.len()));
    out.push_str("TOUR_SECTION\n");
    for node in tour.order() {
        out.push_str(&format!("{}\n", node + 1));
    }
    out.push_str("-1\nEOF\n");
    out
}

/// Write a tour to a `.tour` file.
pub fn write_tour(path: &Path, name: &str, tour: &Tour) -> Result<(), TspError> {
    fs::write(path, render_tour(name, tour))?;
    Ok(())
}

/// The standard parse failure.
fn bad_record(what: &str, line: &str) -> TspError {
    TspError::InvalidInput(format!("malformed {what} record: {line}"))
}
