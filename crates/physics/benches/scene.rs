use criterion::{criterion_group, criterion_main, Criterion};
use physics::{Pose, Rgba, Scene, TableSceneBuilder, Vec3};

fn bench_scene_step(c: &mut Criterion) {
    c.bench_function("scene_step_256_envs", |b| {
        let mut scene = Scene::new(256).unwrap();
        TableSceneBuilder::default().build(&mut scene).unwrap();
        for i in 0..3 {
            let mut builder = scene.create_actor_builder();
            builder
                .set_initial_pose(Pose::from_position(Vec3::new(0.1 * i as f32, 0.0, 0.02)))
                .add_box_visual([0.02, 0.02, 0.04], Rgba::WHITE)
                .add_box_collision([0.02, 0.02, 0.04]);
            let id = builder.build(&mut scene, &format!("item_{i}")).unwrap();
            for env in 0..scene.num_envs() {
                scene.set_linear_velocity(id, env, Vec3::X).unwrap();
            }
        }
        b.iter(|| scene.step(0.01));
    });
}

criterion_group!(benches, bench_scene_step);
criterion_main!(benches);
