use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;

use super::graph::RateGraph;
use common::types::{Cycle, ExchangeEdge, ProductId};

/// Per-product traversal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    Unvisited,
    /// On the active descent path; a route into it closes a cycle.
    InProgress,
    /// Fully explored; routes into it are forward or cross edges.
    Done,
}

/// All quotes from one product to one target, in insertion order.
///
/// The traversal colors routes rather than single quotes, so parallel quotes
/// share one coloring decision. The lead quote (the first inserted) drives the
/// descent; the others are substituted into the cycles the route closes.
#[derive(Debug, Clone)]
struct Route {
    target: ProductId,
    quotes: Vec<ExchangeEdge>,
    /// `positions[k]` = index of `quotes[k]` in `edges_from(source)`.
    positions: Vec<usize>,
    /// Index of the highest-rate quote; the earliest one on ties.
    best: usize,
}

/// Position of a route in the route table: `(source, route index)`.
type RouteRef = (ProductId, usize);

/// A parallel-quote cycle parked until the traversal reaches its quote.
#[derive(Debug)]
enum Variant {
    /// The lead cycle with the edge at `at` swapped for a later quote.
    Swap {
        lead: Rc<[ExchangeEdge]>,
        at: usize,
        quote: ExchangeEdge,
    },
    /// Every route on its best quote.
    Best(Vec<ExchangeEdge>),
}

impl Variant {
    fn into_cycle(self) -> Cycle {
        match self {
            Variant::Swap { lead, at, quote } => {
                let mut edges = lead.to_vec();
                edges[at] = quote;
                Cycle::new(edges)
            }
            Variant::Best(edges) => Cycle::new(edges),
        }
    }
}

/// A product being explored.
#[derive(Debug)]
struct Frame {
    node: ProductId,
    /// Next position in `edges_from(node)`.
    cursor: usize,
    /// Cycles that switch to a later parallel quote of `node`, keyed by that
    /// quote's position. Released when the cursor reaches it.
    deferred: BTreeMap<usize, Vec<Variant>>,
}

/// Depth-first cycle enumerator over a [`RateGraph`].
///
/// Every product is tried as a root in increasing id order, and its quotes are
/// examined in `edges_from` order. A route whose target is still `InProgress`
/// is a back edge: the finder yields the cycle made of the path suffix that
/// starts at the target, followed by that route, using each route's lead quote.
///
/// Parallel quotes add a bounded number of variants per closed cycle:
///
/// - one per later quote on each route, with every other route on its lead quote
/// - one with every route on its best quote, when two or more routes have a
///   better quote than their lead
///
/// A variant is yielded when the traversal reaches the substituted quote in its
/// source's `edges_from` order, so discovery order follows insertion order.
///
/// The descent keeps its own frame and path stacks on the heap instead of
/// recursing, so graph depth is not limited by the thread stack.
///
/// Cycles are produced lazily through [`Iterator`]. The colors live in the
/// finder, not the graph: a new finder always starts a fresh search, and the
/// graph is never mutated.
pub struct CycleFinder {
    routes: Vec<Vec<Route>>,
    /// `route_of[v][i]` = route holding the quote at position `i` of `edges_from(v)`.
    route_of: Vec<Vec<usize>>,
    state: Vec<VisitState>,
    /// `path_start[v]` = index in `path` of the route leaving `v`, which is
    /// also the index of `v`'s frame.
    path_start: Vec<usize>,
    frames: Vec<Frame>,
    path: Vec<RouteRef>,
    next_root: ProductId,
    ready: VecDeque<Cycle>,
}

impl CycleFinder {
    pub fn new(graph: &RateGraph) -> Self {
        let slots = graph.node_count() + 1;
        let (routes, route_of) = Self::build_routes(graph);

        Self {
            routes,
            route_of,
            state: vec![VisitState::Unvisited; slots],
            path_start: vec![0; slots],
            frames: Vec::new(),
            path: Vec::new(),
            next_root: 1,
            ready: VecDeque::new(),
        }
    }

    /// Groups each product's quotes by target, keeping first-insertion order
    /// of targets and insertion order of quotes within a target.
    fn build_routes(graph: &RateGraph) -> (Vec<Vec<Route>>, Vec<Vec<usize>>) {
        let mut table = vec![Vec::new(); graph.node_count() + 1];
        let mut route_of = vec![Vec::new(); graph.node_count() + 1];

        for node in graph.nodes() {
            let mut index_of: HashMap<ProductId, usize> = HashMap::new();
            let routes: &mut Vec<Route> = &mut table[node];

            for (position, &edge) in graph.edges_from(node).iter().enumerate() {
                let idx = *index_of.entry(edge.target).or_insert_with(|| {
                    routes.push(Route {
                        target: edge.target,
                        quotes: Vec::new(),
                        positions: Vec::new(),
                        best: 0,
                    });
                    routes.len() - 1
                });

                let route = &mut routes[idx];
                if edge.rate > route.quotes.get(route.best).map_or(f64::MIN, |q| q.rate) {
                    route.best = route.quotes.len();
                }
                route.quotes.push(edge);
                route.positions.push(position);
                route_of[node].push(idx);
            }
        }

        (table, route_of)
    }

    /// Current color of `node`.
    pub fn state(&self, node: ProductId) -> Option<VisitState> {
        self.state.get(node).copied()
    }

    fn enter(&mut self, node: ProductId) {
        self.state[node] = VisitState::InProgress;
        self.path_start[node] = self.path.len();
        self.frames.push(Frame {
            node,
            cursor: 0,
            deferred: BTreeMap::new(),
        });
    }

    /// Finds the next root still `Unvisited`, in increasing id order.
    fn next_unvisited_root(&mut self) -> Option<ProductId> {
        while self.next_root < self.state.len() {
            let candidate = self.next_root;
            self.next_root += 1;

            if self.state[candidate] == VisitState::Unvisited {
                return Some(candidate);
            }
        }
        None
    }

    /// Builds the lead-quote cycle for the routes in `closed`, which start at
    /// frame `first_frame`, and parks its parallel-quote variants on the frames
    /// that own the substituted quotes.
    fn close(&mut self, first_frame: usize, closed: &[RouteRef]) -> Cycle {
        let lead: Rc<[ExchangeEdge]> = closed
            .iter()
            .map(|&(source, idx)| self.routes[source][idx].quotes[0])
            .collect();

        let mut best = lead.to_vec();
        let mut upgraded: Vec<usize> = Vec::new();

        for (at, &(source, idx)) in closed.iter().enumerate() {
            let route = &self.routes[source][idx];
            let frame = &mut self.frames[first_frame + at];

            for (&quote, &position) in route.quotes.iter().zip(&route.positions).skip(1) {
                frame.deferred.entry(position).or_default().push(Variant::Swap {
                    lead: Rc::clone(&lead),
                    at,
                    quote,
                });
            }

            if route.best != 0 {
                best[at] = route.quotes[route.best];
                upgraded.push(at);
            }
        }

        // With a single upgraded route the best combination is one of the swaps above.
        if let &[at, _, ..] = upgraded.as_slice() {
            let (source, idx) = closed[at];
            let route = &self.routes[source][idx];
            self.frames[first_frame + at]
                .deferred
                .entry(route.positions[route.best])
                .or_default()
                .push(Variant::Best(best));
        }

        Cycle::new(lead.to_vec())
    }
}

impl Iterator for CycleFinder {
    type Item = Cycle;

    fn next(&mut self) -> Option<Cycle> {
        loop {
            if let Some(cycle) = self.ready.pop_front() {
                return Some(cycle);
            }

            let Some(frame) = self.frames.last_mut() else {
                let root = self.next_unvisited_root()?;
                self.enter(root);
                continue;
            };

            let node = frame.node;

            if frame.cursor == self.route_of[node].len() {
                // Every quote of `node` examined: retire it and drop the route we arrived by.
                self.frames.pop();
                self.state[node] = VisitState::Done;
                if !self.frames.is_empty() {
                    self.path.pop();
                }
                continue;
            }

            let position = frame.cursor;
            frame.cursor += 1;
            let route_idx = self.route_of[node][position];
            let route = &self.routes[node][route_idx];

            if route.positions[0] != position {
                // A later parallel quote: release the cycles that use it.
                if let Some(variants) = frame.deferred.remove(&position) {
                    self.ready.extend(variants.into_iter().map(Variant::into_cycle));
                }
                continue;
            }

            let target = route.target;
            match self.state[target] {
                VisitState::Unvisited => {
                    self.path.push((node, route_idx));
                    self.enter(target);
                }
                VisitState::InProgress => {
                    let first_frame = self.path_start[target];
                    let mut closed = Vec::with_capacity(self.path.len() - first_frame + 1);
                    closed.extend_from_slice(&self.path[first_frame..]);
                    closed.push((node, route_idx));

                    return Some(self.close(first_frame, &closed));
                }
                VisitState::Done => {}
            }
        }
    }
}

/// Runs a complete search and collects every cycle in discovery order.
pub fn cycles(graph: &RateGraph) -> Vec<Cycle> {
    CycleFinder::new(graph).collect()
}
