//! A flat list of colored vertices drawn as independent triangles.

use std::rc::Rc;

use crate::color::Color;
use crate::graphics::{GraphicsContext, Primitive};
use crate::renderable::Renderable;
use crate::vertex::Vertex;

/// How a [`Mesh`] picks the color it emits for each vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coloring {
    /// Every vertex is drawn with this color; stored vertex colors are ignored.
    Flat(Color),
    /// Each vertex is drawn with its own color.
    PerVertex,
}

impl Default for Coloring {
    /// Meshes have always drawn in plain red.
    fn default() -> Self {
        Coloring::Flat(Color::RED)
    }
}

/// Ordered vertices, read three at a time as triangles.
///
/// The length should be a multiple of three. Triangles sharing a corner can
/// hold the same `Rc<Vertex>` more than once; the vertex is not copied.
///
/// A trailing group of one or two vertices is still emitted as a short batch
/// rather than rejected.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Rc<Vertex>>,
    coloring: Coloring,
}

impl Mesh {
    pub fn new(vertices: Vec<Rc<Vertex>>) -> Self {
        Self {
            vertices,
            coloring: Coloring::default(),
        }
    }

    /// Builds a mesh where every vertex is its own, unshared allocation.
    pub fn from_vertices(vertices: impl IntoIterator<Item = Vertex>) -> Self {
        Self::new(vertices.into_iter().map(Rc::new).collect())
    }

    /// The single red/green/blue triangle the mesh scene starts with.
    pub fn triangle() -> Self {
        Self::from_vertices([
            Vertex::new(0.0, 1.0, 0.0, Color::RED),
            Vertex::new(-1.0, -1.0, 0.0, Color::GREEN),
            Vertex::new(1.0, -1.0, 0.0, Color::BLUE),
        ])
    }

    pub fn with_coloring(mut self, coloring: Coloring) -> Self {
        self.coloring = coloring;
        self
    }

    pub fn coloring(&self) -> Coloring {
        self.coloring
    }

    pub fn vertices(&self) -> &[Rc<Vertex>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of batches [`Renderable::render`] emits, counting a short tail.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len().div_ceil(3)
    }

    fn color_of(&self, vertex: &Vertex) -> Color {
        match self.coloring {
            Coloring::Flat(color) => color,
            Coloring::PerVertex => vertex.color(),
        }
    }
}

impl Renderable for Mesh {
    fn render(&self, ctx: &mut dyn GraphicsContext) {
        if self.vertices.is_empty() {
            return;
        }

        ctx.begin(Primitive::Triangles);
        for (i, vertex) in self.vertices.iter().enumerate() {
            if i > 0 && i % 3 == 0 {
                ctx.end();
                ctx.begin(Primitive::Triangles);
            }
            let [r, g, b] = self.color_of(vertex).to_rgb_f32();
            let p = vertex.position();
            ctx.color(r, g, b);
            ctx.vertex(p.x, p.y, p.z);
        }
        ctx.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{Command, RecordingContext};
    use test_case::test_case;

    fn mesh_of(n: usize) -> Mesh {
        Mesh::from_vertices((0..n).map(|i| Vertex::new(i as f32, 0.0, 0.0, Color::White)))
    }

    fn render(mesh: &Mesh) -> RecordingContext {
        let mut ctx = RecordingContext::new();
        mesh.render(&mut ctx);
        ctx
    }

    #[test_case(3, 1)]
    #[test_case(6, 2)]
    #[test_case(30, 10)]
    fn full_triangles_get_one_batch_each(vertices: usize, triangles: usize) {
        let mesh = mesh_of(vertices);
        let ctx = render(&mesh);

        assert_eq!(mesh.triangle_count(), triangles);
        assert_eq!(ctx.count(|c| matches!(c, Command::Begin(_))), triangles);
        assert_eq!(ctx.count(|c| *c == Command::End), triangles);
        assert!(ctx.batches().iter().all(|b| b.len() == 3));
    }

    #[test_case(1, &[1])]
    #[test_case(2, &[2])]
    #[test_case(4, &[3, 1])]
    #[test_case(8, &[3, 3, 2])]
    fn trailing_group_is_closed_once(vertices: usize, sizes: &[usize]) {
        let mesh = mesh_of(vertices);
        let ctx = render(&mesh);
        let batch_sizes: Vec<usize> = ctx.batches().iter().map(Vec::len).collect();

        assert_eq!(batch_sizes, sizes);
        assert_eq!(mesh.triangle_count(), sizes.len());
        assert_eq!(ctx.count(|c| *c == Command::End), sizes.len());
        assert_eq!(ctx.commands().last(), Some(&Command::End));
    }

    #[test]
    fn empty_mesh_emits_nothing() {
        assert!(render(&Mesh::default()).commands().is_empty());
    }

    #[test]
    fn color_precedes_each_vertex() {
        let ctx = render(&mesh_of(3));
        let body = &ctx.commands()[1..7];
        for pair in body.chunks(2) {
            assert!(matches!(pair[0], Command::Color(..)));
            assert!(matches!(pair[1], Command::Vertex(..)));
        }
    }

    #[test]
    fn default_coloring_draws_red_regardless_of_vertex_color() {
        let ctx = render(&Mesh::triangle());
        let colors: Vec<_> = ctx
            .commands()
            .iter()
            .filter(|c| matches!(c, Command::Color(..)))
            .collect();

        assert_eq!(colors, vec![&Command::Color(1.0, 0.0, 0.0); 3]);
    }

    #[test]
    fn per_vertex_coloring_uses_stored_colors() {
        let ctx = render(&Mesh::triangle().with_coloring(Coloring::PerVertex));
        let colors: Vec<_> = ctx
            .commands()
            .iter()
            .filter_map(|c| match c {
                Command::Color(r, g, b) => Some([*r, *g, *b]),
                _ => None,
            })
            .collect();

        assert_eq!(colors, vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    }

    #[test]
    fn shared_vertices_are_aliased_not_copied() {
        let a = Rc::new(Vertex::new(0.0, 0.0, 0.0, Color::Black));
        let b = Rc::new(Vertex::new(1.0, 0.0, 0.0, Color::Black));
        let c = Rc::new(Vertex::new(0.0, 1.0, 0.0, Color::Black));
        let d = Rc::new(Vertex::new(1.0, 1.0, 0.0, Color::Black));

        let quad = Mesh::new(vec![a.clone(), b.clone(), c.clone(), b.clone(), d, c.clone()]);

        assert_eq!(Rc::strong_count(&b), 3);
        assert!(Rc::ptr_eq(&quad.vertices()[1], &quad.vertices()[3]));
        assert_eq!(render(&quad).batches().len(), 2);
    }
}
