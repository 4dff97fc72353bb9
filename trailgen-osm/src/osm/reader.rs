use super::categorize::*;
use super::models::*;
use crate::error::ImportError;
use log::info;
use osmpbfreader::objects::{NodeId, WayId};
use std::collections::HashMap;
use std::io::Read;
use std::time::Instant;

// Way as represented in OpenStreetMap
struct Way {
    id: WayId,
    nodes: Vec<NodeId>,
    properties: WayProperties,
}

struct Reader {
    filter: WayFilter,
    nodes: HashMap<NodeId, Node>,
    ways: Vec<Way>,
}

impl Reader {
    fn new(filter: WayFilter) -> Reader {
        Reader {
            filter,
            nodes: HashMap::new(),
            ways: Vec::new(),
        }
    }

    // Splits the way at every node shared with another way, those are the graph nodes
    fn split_way(&self, way: &Way) -> Vec<Edge> {
        let mut result = Vec::new();

        let mut source = NodeId(0);
        let mut target = NodeId(0);
        let mut points = Vec::new();
        for (i, &node_id) in way.nodes.iter().enumerate() {
            let node = match self.nodes.get(&node_id) {
                Some(node) if node.id == node_id => *node,
                // Coordinates of the node are missing from the extract
                _ => continue,
            };
            if points.is_empty() {
                source = node_id;
                points.push(node.coord);
                continue;
            }
            points.push(node.coord);
            target = node_id;

            if node.uses > 1 || i == way.nodes.len() - 1 {
                result.push(Edge {
                    id: way.id,
                    source,
                    target,
                    geometry: std::mem::replace(&mut points, vec![node.coord]).into(),
                    properties: way.properties,
                });
                source = node_id;
            }
        }

        // The way was cut at the border of the extract, keep the part before the cut
        if points.len() > 1 {
            result.push(Edge {
                id: way.id,
                source,
                target,
                geometry: points.into(),
                properties: way.properties,
            });
        }
        result
    }

    fn read_ways<R: Read>(&mut self, pbf: &mut osmpbfreader::OsmPbfReader<R>) {
        for obj in pbf.par_iter() {
            if let Ok(osmpbfreader::OsmObj::Way(way)) = obj {
                let mut properties = WayProperties::default();
                for (key, val) in way.tags.iter() {
                    properties.update(key.as_str(), val.as_str());
                }
                properties.normalize();
                if properties.accessible(self.filter) {
                    for node in &way.nodes {
                        self.nodes.entry(*node).or_insert_with(Node::default).uses += 1;
                    }
                    self.ways.push(Way {
                        id: way.id,
                        nodes: way.nodes,
                        properties,
                    });
                }
            }
        }
    }

    fn read_nodes<R: Read>(&mut self, pbf: &mut osmpbfreader::OsmPbfReader<R>) {
        for obj in pbf.par_iter() {
            if let Ok(osmpbfreader::OsmObj::Node(node)) = obj {
                self.nodes.entry(node.id).and_modify(|mut_node| {
                    mut_node.id = node.id;
                    mut_node.set_coord(node.lon(), node.lat())
                });
            }
        }
    }

    fn edges(&self) -> Vec<Edge> {
        self.ways
            .iter()
            .flat_map(|way| self.split_way(way))
            .collect()
    }
}

/// Reads all ways of the `.pbf` file which pass the filter and splits them into edges.
pub fn read_edges(filename: &str, filter: WayFilter) -> Result<Vec<Edge>, ImportError> {
    let mut r = Reader::new(filter);
    let file = std::fs::File::open(filename)?;
    let mut pbf = osmpbfreader::OsmPbfReader::new(file);

    {
        let t = Instant::now();
        r.read_ways(&mut pbf);
        info!("Decoded {} ways {:.2}s", r.ways.len(), t.elapsed().as_secs_f32());
    }
    {
        let t = Instant::now();
        pbf.rewind().map_err(|e| ImportError::Pbf(e.to_string()))?;
        r.read_nodes(&mut pbf);
        info!("Decoded {} nodes {:.2}s", r.nodes.len(), t.elapsed().as_secs_f32());
    }
    let t = Instant::now();
    let edges = r.edges();
    info!("Split ways into {} edges {:.2}s", edges.len(), t.elapsed().as_secs_f32());

    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailgen::spatial::from_lat_lon;

    fn reader_with_nodes(nodes: &[(i64, i16)]) -> Reader {
        let mut reader = Reader::new(WayFilter::Walkable);
        for &(id, uses) in nodes {
            let mut node = Node::default();
            node.id = NodeId(id);
            node.coord = from_lat_lon(52.0 + 0.001 * id as f64, 5.0);
            node.uses = uses;
            reader.nodes.insert(NodeId(id), node);
        }
        reader
    }

    fn way(nodes: &[i64]) -> Way {
        Way {
            id: WayId(7),
            nodes: nodes.iter().map(|&id| NodeId(id)).collect(),
            properties: WayProperties::default(),
        }
    }

    #[test]
    fn test_split_way_at_shared_nodes() {
        let reader = reader_with_nodes(&[(1, 1), (2, 1), (3, 2), (4, 1)]);

        let edges = reader.split_way(&way(&[1, 2, 3, 4]));

        assert_eq!(edges.len(), 2);
        assert_eq!((edges[0].source, edges[0].target), (NodeId(1), NodeId(3)));
        assert_eq!(edges[0].geometry.0.len(), 3);
        assert_eq!((edges[1].source, edges[1].target), (NodeId(3), NodeId(4)));
        assert_eq!(edges[1].geometry.0.len(), 2);
    }

    #[test]
    fn test_split_way_with_missing_last_node() {
        let mut reader = reader_with_nodes(&[(1, 1), (2, 1)]);
        // Referenced by the way, but the node itself is not in the extract
        reader.nodes.insert(NodeId(3), Node::default());

        let edges = reader.split_way(&way(&[1, 2, 3]));

        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].source, edges[0].target), (NodeId(1), NodeId(2)));
        assert_eq!(edges[0].geometry.0.len(), 2);
    }

    #[test]
    fn test_split_way_with_missing_middle_node() {
        let reader = reader_with_nodes(&[(1, 1), (3, 1)]);

        let edges = reader.split_way(&way(&[1, 2, 3]));

        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].source, edges[0].target), (NodeId(1), NodeId(3)));
    }

    #[test]
    fn test_split_way_with_single_known_node() {
        let reader = reader_with_nodes(&[(1, 1)]);
        assert!(reader.split_way(&way(&[1, 2])).is_empty());
    }
}
