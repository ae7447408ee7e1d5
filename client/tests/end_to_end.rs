use approx::assert_relative_eq;
use scene_client::{AssetLibrary, MeshSource, derive_body_desc, restoring_impulse};
use shared::{PHYSICS_SCALE, ToPhysics, ToRender, Vec3};
use std::time::{Duration, Instant};

const TIMEOUT: Duration = Duration::from_secs(2);

#[test]
fn tetrahedron_is_created_pulled_and_reported() {
    let (link, physics) = physics_server::spawn(Duration::from_millis(5)).unwrap();
    let recv = || link.from_physics.recv_timeout(TIMEOUT).unwrap();

    assert_eq!(recv(), ToRender::Init);
    link.to_physics
        .send(ToPhysics::World {
            gravity: Vec3::zeros(),
        })
        .unwrap();
    assert_eq!(recv(), ToRender::World);

    let mut node = AssetLibrary::new(".").load("builtin:tetrahedron").unwrap();
    node.translation = Vec3::new(400.0, 0.0, 0.0);
    node.scale = Vec3::repeat(0.01);
    let desc = derive_body_desc(1, &node, PHYSICS_SCALE).unwrap();
    link.to_physics
        .send(ToPhysics::DynamicBodyWithConvexHullColliders(desc))
        .unwrap();

    let ToRender::RigidBody { object_id, mass } = recv() else {
        panic!("expected a rigidBody ack");
    };
    assert_eq!(object_id, 1);
    assert!(mass > 0.0);

    let impulse = restoring_impulse(node.translation, mass, 0.5, PHYSICS_SCALE).unwrap();
    assert!(impulse.x < 0.0);
    link.to_physics
        .send(ToPhysics::ApplyImpulse { object_id, impulse })
        .unwrap();
    link.to_physics.send(ToPhysics::Start).unwrap();

    let deadline = Instant::now() + TIMEOUT;
    let mut last_x = None;
    while Instant::now() < deadline {
        if let Ok(ToRender::Active(report)) = link.from_physics.recv_timeout(TIMEOUT) {
            assert_eq!(report.len(), 1);
            assert_eq!(report[0].object_id, 1);
            let x = report[0].translation.x;
            last_x = Some(x);
            if x < 0.4 {
                break;
            }
        }
    }

    // Started at 400 render units, i.e. 0.4 in physics space, and drifting towards the origin.
    let last_x = last_x.expect("no active report arrived");
    assert!(last_x < 0.4, "body did not move towards the origin: {last_x}");
    assert_relative_eq!(last_x, 0.4, epsilon = 0.1);

    link.to_physics.send(ToPhysics::Stop).unwrap();
    drop(link);
    assert!(physics.join().is_ok());
}
