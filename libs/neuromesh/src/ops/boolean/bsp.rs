//! # BSP Tree
//!
//! Binary space partitioning tree built from the faces of one closed
//! operand and used to cut the other operand's polygons into pieces that
//! lie entirely inside or outside it.
//!
//! ```text
//!           [Plane]
//!          /       \
//!      Front       Back
//!     (+ side)   (- side)
//! ```
//!
//! Every face of the solid is a splitter, so a piece that falls off a node
//! with no front child is outside the solid and a piece that falls off a
//! node with no back child is inside.
//!
//! ## Coplanar pieces
//!
//! A piece lying in a node's plane sits on the solid's surface. Where it
//! overlaps a face of the solid it is sent to the side given by its
//! [`CoplanarRoute`], which decides whether shared faces are kept once,
//! twice, or not at all.
//!
//! ## Stack Safety
//!
//! Nodes live in one arena and every walk uses an explicit work stack.
//! A convex operand yields a tree as deep as its face count.

use super::polygon::{split_polygon, BspPolygon, Plane, PolygonClassification};

/// Region of the solid a clip keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Pieces inside the solid
    Inside,
    /// Pieces outside the solid
    Outside,
}

/// Side a piece lying in a node's plane is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoplanarRoute {
    /// Front when it faces the same way as the plane, back otherwise
    WithNormal,
    /// Back when it faces the same way as the plane, front otherwise
    AgainstNormal,
    /// Always front
    Front,
    /// Always back
    Back,
}

impl CoplanarRoute {
    fn sends_front(self, poly: &BspPolygon, plane: &Plane) -> bool {
        let same_facing = poly.normal.dot(plane.normal) > 0.0;
        match self {
            CoplanarRoute::WithNormal => same_facing,
            CoplanarRoute::AgainstNormal => !same_facing,
            CoplanarRoute::Front => true,
            CoplanarRoute::Back => false,
        }
    }
}

#[derive(Debug)]
struct BspNode {
    plane: Plane,
    front: Option<usize>,
    back: Option<usize>,
}

/// Which child slot of a parent a pending subtree fills.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Front(usize),
    Back(usize),
}

/// BSP tree over the faces of a closed solid. An empty tree is an empty
/// solid.
#[derive(Debug, Default)]
pub struct BspTree {
    nodes: Vec<BspNode>,
}

impl BspTree {
    /// Builds the tree, splitting by the first polygon's plane at each node.
    pub fn build(polygons: Vec<BspPolygon>, tolerance: f64) -> Self {
        let mut nodes: Vec<BspNode> = Vec::new();
        let mut stack: Vec<(Option<Slot>, Vec<BspPolygon>)> = vec![(None, polygons)];

        while let Some((slot, polys)) = stack.pop() {
            let Some(first) = polys.first() else {
                continue;
            };
            let plane = Plane::from_polygon(first);
            // Faces in the splitting plane need no node of their own.
            let (_, front, back) = partition(polys, &plane, tolerance);

            let index = nodes.len();
            nodes.push(BspNode {
                plane,
                front: None,
                back: None,
            });
            match slot {
                Some(Slot::Front(parent)) => nodes[parent].front = Some(index),
                Some(Slot::Back(parent)) => nodes[parent].back = Some(index),
                None => {}
            }

            if !front.is_empty() {
                stack.push((Some(Slot::Front(index)), front));
            }
            if !back.is_empty() {
                stack.push((Some(Slot::Back(index)), back));
            }
        }

        Self { nodes }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 1usize)];
        while let Some((index, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.nodes[index];
            stack.extend(node.front.map(|child| (child, depth + 1)));
            stack.extend(node.back.map(|child| (child, depth + 1)));
        }
        max_depth
    }

    /// Cuts `polygons` along the tree and returns the pieces in `keep`.
    pub fn clip_polygons(
        &self,
        polygons: Vec<BspPolygon>,
        keep: Region,
        route: CoplanarRoute,
        tolerance: f64,
    ) -> Vec<BspPolygon> {
        if self.nodes.is_empty() {
            return match keep {
                Region::Outside => polygons,
                Region::Inside => Vec::new(),
            };
        }

        let mut result = Vec::new();
        let mut stack: Vec<(usize, Vec<BspPolygon>)> = vec![(0, polygons)];
        while let Some((index, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }
            let node = &self.nodes[index];
            let (coplanar, mut front, mut back) = partition(polys, &node.plane, tolerance);
            for poly in coplanar {
                if route.sends_front(&poly, &node.plane) {
                    front.push(poly);
                } else {
                    back.push(poly);
                }
            }

            match node.front {
                Some(child) => stack.push((child, front)),
                None if keep == Region::Outside => result.extend(front),
                None => {}
            }
            match node.back {
                Some(child) => stack.push((child, back)),
                None if keep == Region::Inside => result.extend(back),
                None => {}
            }
        }
        result
    }
}

/// Sorts polygons into (coplanar, front, back) of `plane`, splitting the
/// spanning ones.
fn partition(
    polygons: Vec<BspPolygon>,
    plane: &Plane,
    tolerance: f64,
) -> (Vec<BspPolygon>, Vec<BspPolygon>, Vec<BspPolygon>) {
    let mut coplanar = Vec::new();
    let mut front = Vec::with_capacity(polygons.len() / 2 + 1);
    let mut back = Vec::with_capacity(polygons.len() / 2 + 1);
    for poly in polygons {
        let (classification, front_part, back_part) = split_polygon(&poly, plane, tolerance);
        match classification {
            PolygonClassification::Coplanar => coplanar.push(poly),
            PolygonClassification::Front => front.push(poly),
            PolygonClassification::Back => back.push(poly),
            PolygonClassification::Spanning => {
                front.extend(front_part);
                back.extend(back_part);
            }
        }
    }
    (coplanar, front, back)
}
