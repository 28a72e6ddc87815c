//! Depth-first path search over a district's segments.
//!
//! Segments form an undirected graph whose vertices are locations. A
//! segment can be travelled in its declared direction or backwards. The
//! search returns the *first* path it finds, not the cheapest: candidates are
//! tried in row order, forward traversals before reverse ones, so the result
//! depends on the order the guide lists its rows.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::domain::{Location, Segment};

/// Which way a segment is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From `from` to `to`, as declared
    Forward,
    /// From `to` to `from`
    Reverse,
}

/// One traversal in a found path: a segment (by row index) and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub direction: Direction,
}

/// Result of a path search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSearch {
    /// Steps from start to destination, or `None` if none was found.
    pub path: Option<Vec<Step>>,

    /// Number of locations expanded during the search.
    pub locations_explored: usize,
}

/// A traversal out of a location: the step taken and where it leads.
#[derive(Debug, Clone, Copy)]
struct Edge<'a> {
    step: Step,
    far: &'a Location,
}

/// Outgoing traversals per location, built once per search.
///
/// Each list holds the location's forward traversals in row order, then its
/// reverse traversals in row order.
struct Adjacency<'a> {
    edges: HashMap<&'a Location, Vec<Edge<'a>>>,
}

impl<'a> Adjacency<'a> {
    fn new<S: Borrow<Segment>>(segments: &'a [S]) -> Self {
        let mut edges: HashMap<&'a Location, Vec<Edge<'a>>> = HashMap::new();
        for direction in [Direction::Forward, Direction::Reverse] {
            for (index, segment) in segments.iter().enumerate() {
                let segment: &'a Segment = segment.borrow();
                let (near, far) = match direction {
                    Direction::Forward => (segment.from(), segment.to()),
                    Direction::Reverse => (segment.to(), segment.from()),
                };
                edges.entry(near).or_default().push(Edge {
                    step: Step { index, direction },
                    far,
                });
            }
        }
        Self { edges }
    }

    fn from(&self, location: &Location) -> &[Edge<'a>] {
        self.edges.get(location).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Recursive search state.
///
/// `visited` holds the locations on the current branch only; a location is
/// released again when the search backtracks past it.
struct Dfs<'a, 'g> {
    adjacency: &'g Adjacency<'a>,
    destination: &'a Location,
    max_depth: usize,
    visited: HashSet<&'a Location>,
    path: Vec<Step>,
    explored: usize,
}

impl<'a> Dfs<'a, '_> {
    fn visit(&mut self, at: &'a Location) -> bool {
        // Branches longer than the bound are dead ends
        if self.path.len() > self.max_depth {
            return false;
        }
        if at == self.destination {
            return true;
        }

        self.explored += 1;
        self.visited.insert(at);
        trace!(location = %at, depth = self.path.len(), "exploring");

        let adjacency = self.adjacency;
        for edge in adjacency.from(at) {
            if self.visited.contains(edge.far) {
                continue;
            }

            self.path.push(edge.step);
            if self.visit(edge.far) {
                return true;
            }
            self.path.pop();
        }

        self.visited.remove(at);
        false
    }
}

/// Find a path from `start` to `destination` using at most `max_depth`
/// segments.
///
/// When `start == destination` the path is empty.
pub fn find_path<S: Borrow<Segment>>(
    segments: &[S],
    start: &Location,
    destination: &Location,
    max_depth: usize,
) -> PathSearch {
    let adjacency = Adjacency::new(segments);
    let mut dfs = Dfs {
        adjacency: &adjacency,
        destination,
        max_depth,
        visited: HashSet::new(),
        path: Vec::new(),
        explored: 0,
    };

    let found = dfs.visit(start);
    PathSearch {
        path: found.then_some(dfs.path),
        locations_explored: dfs.explored,
    }
}

/// Turn steps into segments oriented in travel order.
pub fn orient<S: Borrow<Segment>>(segments: &[S], path: &[Step]) -> Vec<Segment> {
    path.iter()
        .map(|step| {
            let segment: &Segment = segments[step.index].borrow();
            match step.direction {
                Direction::Forward => segment.clone(),
                Direction::Reverse => segment.reversed(),
            }
        })
        .collect()
}
