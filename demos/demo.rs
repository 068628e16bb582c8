//! SimpleGraph 演示脚本
//!
//! 构建一个小图，对两种划分打分，再删除一个顶点

use simplegraph::{attributes_from_json, Graph};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("SimpleGraph 演示");
    println!("================\n");

    let mut graph = Graph::new();

    // 两个三角形，由 c -> d 相连
    println!("1. 构建图...");
    for (name, group) in [("a", 1), ("b", 1), ("c", 1), ("d", 2), ("e", 2), ("f", 2)] {
        graph.add_vertex(attributes_from_json(json!({ "name": name, "group": group }))?)?;
    }
    for (s, t, w) in [
        ("a", "b", 1.0),
        ("b", "c", 1.0),
        ("c", "a", 1.0),
        ("d", "e", 2.0),
        ("e", "f", 2.0),
        ("f", "d", 2.0),
        ("c", "d", 0.5),
    ] {
        graph.add_weighted_edge(s, t, w)?;
    }
    println!("   {}\n", graph.summary());

    // 打分
    println!("2. 模块度...");
    let good = vec![vec!["a", "b", "c"], vec!["d", "e", "f"]];
    let bad = vec![vec!["a", "d"], vec!["b", "e"], vec!["c", "f"]];
    for (label, communities) in [("按三角形划分", &good), ("交错划分", &bad)] {
        println!(
            "   {}: networkx={:.4} qyj={:.4} zm={:.4}",
            label,
            graph.modularity_from_networkx(communities)?,
            graph.modularity_from_qyj(communities)?,
            graph.modularity_from_zm(communities)?,
        );
    }
    println!();

    // 删除桥接顶点
    println!("3. 删除顶点 c...");
    let c = graph.vertices().find("c")?.index();
    graph.delete_vertices([c])?;
    graph.check_consistency()?;
    println!("   {}", graph.summary());
    println!("   度数: {:?}", graph.degree());
    println!("   统计: {}", graph.stats().to_json());

    println!("\n演示完成!");
    Ok(())
}
