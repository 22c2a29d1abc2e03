use super::{
    Capability, ClearMask, DepthFunc, GraphicsContext, Hint, MatrixMode, Primitive, ShadeModel,
};

/// One call made against a [`GraphicsContext`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Clear(ClearMask),
    MatrixMode(MatrixMode),
    LoadIdentity,
    Translate(f32, f32, f32),
    Perspective {
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Viewport(i32, i32, u32, u32),
    Begin(Primitive),
    Color(f32, f32, f32),
    Vertex(f32, f32, f32),
    End,
    ShadeModel(ShadeModel),
    ClearColor(f32, f32, f32, f32),
    ClearDepth(f32),
    Enable(Capability),
    DepthFunc(DepthFunc),
    Hint(Hint),
}

/// A context that draws nothing and records every command it receives.
///
/// Useful for tracing a frame and for asserting on command streams.
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<Command>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Drains the recorded commands, leaving the context empty.
    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn count(&self, pred: impl Fn(&Command) -> bool) -> usize {
        self.commands.iter().filter(|&c| pred(c)).count()
    }

    /// Vertex positions grouped by begin/end batch.
    ///
    /// A batch left open at the end of the stream is still returned.
    pub fn batches(&self) -> Vec<Vec<[f32; 3]>> {
        let mut batches = Vec::new();
        let mut current: Option<Vec<[f32; 3]>> = None;
        for command in &self.commands {
            match *command {
                Command::Begin(_) => current = Some(Vec::new()),
                Command::Vertex(x, y, z) => {
                    if let Some(batch) = current.as_mut() {
                        batch.push([x, y, z]);
                    }
                }
                Command::End => batches.extend(current.take()),
                _ => {}
            }
        }
        batches.extend(current);
        batches
    }

    fn push(&mut self, command: Command) {
        self.commands.push(command);
    }
}

impl GraphicsContext for RecordingContext {
    fn clear(&mut self, mask: ClearMask) {
        self.push(Command::Clear(mask));
    }

    fn matrix_mode(&mut self, mode: MatrixMode) {
        self.push(Command::MatrixMode(mode));
    }

    fn load_identity(&mut self) {
        self.push(Command::LoadIdentity);
    }

    fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.push(Command::Translate(x, y, z));
    }

    fn perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        self.push(Command::Perspective {
            fov_y,
            aspect,
            near,
            far,
        });
    }

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.push(Command::Viewport(x, y, width, height));
    }

    fn begin(&mut self, primitive: Primitive) {
        self.push(Command::Begin(primitive));
    }

    fn color(&mut self, r: f32, g: f32, b: f32) {
        self.push(Command::Color(r, g, b));
    }

    fn vertex(&mut self, x: f32, y: f32, z: f32) {
        self.push(Command::Vertex(x, y, z));
    }

    fn end(&mut self) {
        self.push(Command::End);
    }

    fn shade_model(&mut self, model: ShadeModel) {
        self.push(Command::ShadeModel(model));
    }

    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.push(Command::ClearColor(r, g, b, a));
    }

    fn clear_depth(&mut self, depth: f32) {
        self.push(Command::ClearDepth(depth));
    }

    fn enable(&mut self, capability: Capability) {
        self.push(Command::Enable(capability));
    }

    fn depth_func(&mut self, func: DepthFunc) {
        self.push(Command::DepthFunc(func));
    }

    fn hint(&mut self, hint: Hint) {
        self.push(Command::Hint(hint));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_group_vertices_between_begin_and_end() {
        let mut ctx = RecordingContext::new();
        ctx.begin(Primitive::Triangles);
        ctx.vertex(0.0, 0.0, 0.0);
        ctx.vertex(1.0, 0.0, 0.0);
        ctx.end();
        ctx.begin(Primitive::Triangles);
        ctx.vertex(2.0, 0.0, 0.0);

        assert_eq!(
            ctx.batches(),
            vec![
                vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
                vec![[2.0, 0.0, 0.0]],
            ]
        );
    }

    #[test]
    fn take_drains_commands() {
        let mut ctx = RecordingContext::new();
        ctx.load_identity();
        assert_eq!(ctx.take(), vec![Command::LoadIdentity]);
        assert!(ctx.commands().is_empty());
    }
}
