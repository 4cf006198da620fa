// Magellan: A solver laboratory for the symmetric Euclidean TSP
// Copyright (C) 2023 Tibor Schneider <sctibor@ethz.ch>
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

//! The kick: a multi-segment perturbation that provably returns a single cycle.
//!
//! A kick of strength `s` deletes the out-arcs of `s` pairwise non-adjacent nodes, splitting
//! the tour into `s` preserved segments, and then reconnects the loose ends at random. The
//! procedure runs as a two-phase state machine:
//!
//! 1. **Select & embed.** The cut nodes are sorted by their traversal rank and mirrored into an
//!    *embedded* successor array of size `2s`: position `2r` holds the `r`-th cut node (the
//!    tail of a preserved segment) and `2r+1` its old successor (the head of the next one).
//!    Odd positions start out pointing at the following even position, one embedded arc per
//!    preserved segment.
//! 2. **Reconnect.** `s` times, draw a random loose source (no outgoing embedded arc) and a
//!    random legal target, and commit the arc in both the embedded and the real array. A
//!    union-find over the embedded positions guards against closing a sub-cycle: except for
//!    the final arc, source and target must sit in different sets. Targeting a loose *tail*
//!    first flips its whole segment (in both arrays) so that the far end becomes the new loose
//!    end and a valid target again.

use log::trace;
use rand::prelude::*;

use tspcore::prelude::*;

/// Walk the embedded arcs from `from` and return the number of steps to reach `to`, or 0 when
/// `to` is not reachable.
fn emb_path_len(embsucc: &[Option<usize>], from: usize, to: usize) -> usize {
    let mut act = from;
    let mut steps = 0;
    while let Some(next) = embsucc[act] {
        steps += 1;
        act = next;
        if act == to {
            return steps;
        }
        if act == from {
            return 0;
        }
    }
    0
}

/// Reverse the embedded chain `u -> ... -> v` in place; the stale arc out of `u` is the
/// caller's to clear.
fn emb_reverse(embsucc: &mut [Option<usize>], u: usize, v: usize) {
    let mut chain = Vec::with_capacity(embsucc.len());
    let mut act = u;
    chain.push(act);
    while act != v {
        act = embsucc[act].expect("the embedded path from u to v is connected");
        chain.push(act);
    }
    for w in chain.windows(2) {
        embsucc[w[1]] = Some(w[0]);
    }
}

/// Perturb the tour with a kick of the given strength. The strength is clamped to the feasible
/// range `2 <= s < N/2`; tours too small to cut twice are left untouched. The result is always
/// a valid single-cycle tour.
pub fn kick<R: Rng + ?Sized>(tour: &mut Tour, strength: usize, rng: &mut R) {
    let n = tour.len();
    if n < 6 {
        return;
    }
    let strength = strength.clamp(2, (n - 1) / 2);
    let embsize = 2 * strength;

    // phase 1: select s pairwise non-adjacent nodes...
    let mut selected: Vec<NodeId> = Vec::with_capacity(strength);
    while selected.len() < strength {
        let candidate = rng.gen_range(0..n);
        let valid = selected.iter().all(|&s| {
            candidate != s && candidate != tour.succ(s) && tour.succ(candidate) != s
        });
        if valid {
            selected.push(candidate);
        }
    }

    // ...sort them in tour order (the reverses below would make a mess otherwise)...
    let mut pos = vec![0; n];
    for (rank, node) in tour.order().into_iter().enumerate() {
        pos[node] = rank;
    }
    selected.sort_unstable_by_key(|&s| pos[s]);

    // ...and build the embedding: even positions are segment tails, odd ones segment heads
    let mut map = vec![0; embsize];
    for (r, &x) in selected.iter().enumerate() {
        map[2 * r] = x;
        map[2 * r + 1] = tour.succ(x);
    }
    let mut embsucc: Vec<Option<usize>> = vec![None; embsize];
    let mut uf = UnionFind::new(embsize);
    let mut is_target = vec![true; embsize];
    for r in 0..strength {
        let head = 2 * r + 1;
        let tail = (2 * r + 2) % embsize;
        embsucc[head] = Some(tail);
        uf.union_set(head, tail);
    }

    // the deleted real arcs are left stale: every loose end receives exactly one new arc
    // before the procedure ends, overwriting them
    let succ = tour.successors_mut();

    // phase 2: one arc creation per iteration
    for remaining in (0..strength).rev() {
        let sources: Vec<usize> = (0..embsize).filter(|&i| embsucc[i].is_none()).collect();
        let a = sources[rng.gen_range(0..sources.len())];
        is_target[a] = false;

        // on the final arc the sub-cycle guard is dropped so the tour can close
        let mut targets = Vec::with_capacity(embsize);
        for i in 0..embsize {
            if is_target[i] && (remaining == 0 || !uf.same_set(a, i)) {
                targets.push(i);
            }
        }
        let b = targets[rng.gen_range(0..targets.len())];
        is_target[b] = false;
        trace!("new arc {}({}) -> {}({})", map[a] + 1, a, map[b] + 1, b);

        if embsucc[b].is_none() {
            // b is a loose tail: reverse its segment from the far end u, so that u becomes
            // the new loose end (and a valid target again) and b the head
            let mut u = b;
            let mut max_len = 0;
            for i in 0..embsize {
                if i == b || !uf.same_set(b, i) {
                    continue;
                }
                let len = emb_path_len(&embsucc, b, i).max(emb_path_len(&embsucc, i, b));
                if len > max_len {
                    max_len = len;
                    u = i;
                }
            }
            trace!("reverse {}({}) ~-> {}({})", map[u] + 1, u, map[b] + 1, b);

            emb_reverse(&mut embsucc, u, b);
            embsucc[u] = None;
            is_target[u] = true;

            reverse_path(succ, map[u], map[b]);
        }

        // commit the arc in the embedding, the union-find, and the real tour
        embsucc[a] = Some(b);
        uf.union_set(a, b);
        succ[map[a]] = map[b];
    }

    debug_assert!(tour.validate().is_ok());
}
