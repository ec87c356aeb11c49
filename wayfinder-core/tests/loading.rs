use std::fs;

use wayfinder_core::prelude::*;

#[test]
fn test_create_graph_from_csv_and_inline_edges() {
    let dir = std::env::temp_dir().join(format!("wayfinder-loading-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("edges.csv");
    fs::write(
        &path,
        "from,to,distance\nMain Gate,Library,250\nLibrary,Science Hall,180\n",
    )
    .unwrap();

    let config = GraphConfig {
        edges_path: Some(path),
        edges: vec![EdgeRecord::new("Science Hall", "Cafeteria", 90.0)],
        landmarks: vec!["Library".into()],
    };
    let (graph, landmarks) = create_graph(&config).unwrap();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(graph.location_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(landmarks.len(), 1);

    let route = shortest_path(&graph, &"Main Gate".into(), &"Cafeteria".into(), &landmarks).unwrap();
    assert_eq!(route.distance(), 520.0);
    assert_eq!(route.landmarks(), [Location::from("Library")]);
}

#[test]
fn test_graph_config_from_json() {
    let config: GraphConfig = serde_json::from_str(
        r#"{
            "edges": [{"from": "A", "to": "B", "distance": 100.0}],
            "landmarks": ["B"]
        }"#,
    )
    .unwrap();

    assert!(config.edges_path.is_none());
    let (graph, landmarks) = create_graph(&config).unwrap();
    assert_eq!(graph.distance_between(&"B".into(), &"A".into()), Some(100.0));
    assert!(landmarks.contains(&"B".into()));
}

#[test]
fn test_distance_matrix_is_symmetric() {
    let mut graph = Graph::new();
    graph.connect("A", "B", 3.0).unwrap();
    graph.connect("B", "C", 4.0).unwrap();
    graph.connect("C", "D", 5.0).unwrap();
    let locations: Vec<Location> = graph.locations().cloned().collect();

    let matrix = distance_matrix(&graph, &locations);
    for (i, row) in matrix.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            assert_eq!(*value, matrix[j][i]);
        }
    }
    assert_eq!(matrix[0][3], Some(12.0));
}
