use crate::core::scene::Scene;
use crate::renderer::instance::{FrameBuffer, NodeInstance};

/// Rebuild the frame buffer from the scene.
/// One instance per node, in node id order, so the host can index its
/// retained objects by id. Hidden nodes are written with `visible = 0`.
pub fn build_frame_buffer(scene: &Scene, buffer: &mut FrameBuffer) {
    buffer.clear();
    for node in scene.iter() {
        buffer.push(NodeInstance::from_node(node));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::Node;
    use glam::Vec3;

    #[test]
    fn one_instance_per_node_in_id_order() {
        let mut scene = Scene::new();
        scene.spawn(Node::new().with_pos(Vec3::new(1.0, 2.0, 3.0)));
        scene.spawn(Node::new().hidden());
        scene.spawn(Node::new().with_scale(Vec3::new(1.0, -1.0, 1.0)));

        let mut buffer = FrameBuffer::new();
        build_frame_buffer(&scene, &mut buffer);

        assert_eq!(buffer.instance_count(), 3);
        assert_eq!(buffer.instances[0].x, 1.0);
        assert_eq!(buffer.instances[0].visible, 1.0);
        assert_eq!(buffer.instances[1].visible, 0.0);
        assert_eq!(buffer.instances[2].sy, -1.0);
    }

    #[test]
    fn rebuild_replaces_previous_frame() {
        let mut scene = Scene::new();
        let id = scene.spawn(Node::new());
        let mut buffer = FrameBuffer::new();
        build_frame_buffer(&scene, &mut buffer);

        scene.get_mut(id).unwrap().pos.z = -400.0;
        build_frame_buffer(&scene, &mut buffer);
        assert_eq!(buffer.instance_count(), 1);
        assert_eq!(buffer.instances[0].z, -400.0);
    }
}
