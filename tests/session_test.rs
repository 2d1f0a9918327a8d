use cubefall::config::{SimulationParams, TimestepSettings};
use cubefall::rendering::camera::Camera;
use cubefall::rendering::frame::FrameData;
use cubefall::rendering::light::Light;
use cubefall::{SimEvent, SimulationSession};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn session(boxes_number: usize, seed: u64) -> SimulationSession {
    let params = SimulationParams {
        boxes_number,
        ..SimulationParams::default()
    };
    SimulationSession::with_seed(params, &TimestepSettings::default(), seed)
}

#[test]
fn bodies_and_meshes_keep_equal_length() {
    let mut session = session(25, 1);
    for _ in 0..120 {
        assert_eq!(session.body_count(), 25);
        assert_eq!(session.mesh_count(), 25);
        session.step_frame(FRAME);
    }
    assert_eq!(session.body_count(), session.mesh_count());
}

#[test]
fn meshes_mirror_bodies_after_every_frame() {
    let mut session = session(20, 2);
    for frame in 0..200 {
        if frame == 50 {
            session.throw_boxes();
        }
        let stats = session.step_frame(FRAME);
        assert_eq!(stats.synced, 20);
        for i in 0..session.body_count() {
            let body = session.body_transform(i).expect("body exists");
            let mesh = session.mesh_transform(i).expect("mesh exists");
            assert_eq!(body, mesh, "pair {} diverged on frame {}", i, frame);
        }
    }
}

#[test]
fn fixed_mode_runs_one_step_per_frame() {
    let mut session = session(5, 3);
    for elapsed in [Duration::ZERO, Duration::from_millis(5), Duration::from_millis(250)] {
        assert_eq!(session.step_frame(elapsed).steps, 1);
    }
    assert_eq!(session.physics().steps(), 3);
    assert_eq!(session.frame(), 3);
}

#[test]
fn throw_changes_every_dynamic_velocity_and_no_static_one() {
    let mut session = session(30, 4);
    for _ in 0..10 {
        session.step_frame(FRAME);
    }
    let before: Vec<_> = (0..30).map(|i| session.body_velocity(i).unwrap()).collect();
    let statics_before = session.static_body_transforms();

    assert!(session.apply(SimEvent::Throw));

    for (i, old) in before.iter().enumerate() {
        assert_ne!(session.body_velocity(i).unwrap(), *old, "box {} was not thrown", i);
    }
    assert_eq!(session.static_body_transforms(), statics_before);
    assert!(session
        .static_body_velocities()
        .iter()
        .all(|v| v.x == 0.0 && v.y == 0.0 && v.z == 0.0));
}

#[test]
fn gravity_setting_only_changes_y() {
    let mut session = session(3, 5);
    assert_eq!(session.gravity().y, -9.82);

    session.set_gravity(3.5);
    let g = session.gravity();
    assert_eq!((g.x, g.y, g.z), (0.0, -3.5, 0.0));
    assert_eq!(session.params().gravity, 3.5);

    session.apply(SimEvent::SetGravity(20.0));
    let g = session.gravity();
    assert_eq!((g.x, g.y, g.z), (0.0, -20.0, 0.0));
}

#[test]
fn throw_force_setting_updates_params() {
    let mut session = session(3, 6);
    assert!(session.apply(SimEvent::SetThrowForce(27.0)));
    assert_eq!(session.params().throw_force, 27.0);
    // Resizes belong to the viewer.
    assert!(!session.apply(SimEvent::Resize { width: 640, height: 480 }));
}

#[test]
fn container_never_moves() {
    let mut session = session(40, 7);
    let initial = session.static_body_transforms();
    assert_eq!(initial.len(), 6);

    for frame in 0..600 {
        if frame % 100 == 0 {
            session.throw_boxes();
        }
        session.step_frame(FRAME);
    }
    assert_eq!(session.static_body_transforms(), initial);
}

#[test]
fn boxes_come_to_rest_inside_the_container() {
    let mut session = session(30, 8);
    for _ in 0..600 {
        session.step_frame(FRAME);
    }

    let params = session.params().clone();
    let half = params.container_size / 2.0 + params.box_size;
    for i in 0..session.body_count() {
        let p = session.body_transform(i).unwrap().position;
        assert!(p.x.abs() <= half && p.z.abs() <= half, "box {} left through a wall: {:?}", i, p);
        assert!(p.y >= -params.box_size, "box {} fell through the floor: {:?}", i, p);
        assert!(p.y <= params.container_size / 2.0, "box {} is still falling: {:?}", i, p);
    }
}

#[test]
fn empty_session_still_renders_the_enclosure() {
    let mut session = session(0, 9);
    for _ in 0..60 {
        let stats = session.step_frame(FRAME);
        assert_eq!(stats.synced, 0);
    }
    assert_eq!(session.throw_boxes(), 0);

    let camera = Camera::new(75.0, 1.5);
    let light = Light::above_container(session.params().container_size);
    let frame = FrameData::extract(session.scene(), &camera, &light);
    assert_eq!(frame.opaque.len(), 0);
    assert_eq!(frame.translucent.len(), 6);
}

#[test]
fn same_seed_places_boxes_identically() {
    let a = session(10, 42);
    let b = session(10, 42);
    for i in 0..10 {
        assert_eq!(a.body_transform(i), b.body_transform(i));
    }
}
