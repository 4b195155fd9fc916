// This file contains the embedding step: projecting a set of high-dimensional feature vectors
// down to 2-D for density clustering. Three methods are available: Barnes-Hut t-SNE, a UMAP-style
// embedding and a coarser graph-based embedding, the latter two both built on an HNSW
// nearest-neighbour graph.

// Copyright 2025 Longbin contributors

// This file is part of Longbin. Longbin is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Longbin is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Longbin. If not, see <http://www.gnu.org/licenses/>.

use annembed::fromhnsw::{kgraph::KGraph, kgraph_from_hnsw_all};
use annembed::prelude::*;
use hnsw_rs::prelude::{DistL2, Hnsw};

use crate::misc::quit_with_error;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Embedding {
    Tsne,
    Umap,
    Graph,
}

impl Embedding {
    pub fn from_name(name: &str) -> Option<Embedding> {
        match name {
            "tsne" => Some(Embedding::Tsne),
            "umap" => Some(Embedding::Umap),
            "graph" => Some(Embedding::Graph),
            _ => None,
        }
    }

    pub fn embed(&self, data: &[Vec<f64>]) -> Vec<[f64; 2]> {
        // Projects the given vectors (one per read) into 2-D. This is a blocking call with no
        // partial results: any failure inside the embedding is fatal to the whole run.
        match self {
            Embedding::Tsne => tsne_embedding(data),
            Embedding::Umap => hnsw_embedding(data, 15),
            Embedding::Graph => hnsw_embedding(data, 6),
        }
    }
}


fn tsne_embedding(data: &[Vec<f64>]) -> Vec<[f64; 2]> {
    // Barnes-Hut t-SNE. The perplexity is capped so small inputs still satisfy the requirement
    // that each point has at least three-perplexity neighbours.
    let perplexity = 30.0_f64.min((data.len() as f64 - 2.0) / 3.0).max(1.0);
    let vectors: Vec<&[f64]> = data.iter().map(|v| v.as_slice()).collect();
    let mut tsne = bhtsne::tSNE::new(&vectors);
    let flat = tsne.embedding_dim(2)
                   .perplexity(perplexity)
                   .epochs(1000)
                   .barnes_hut(0.5, |a, b| {
                       a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
                   })
                   .embedding();
    flat.chunks(2).map(|point| [point[0], point[1]]).collect()
}


fn hnsw_embedding(data: &[Vec<f64>], neighbours: usize) -> Vec<[f64; 2]> {
    // Builds an HNSW nearest-neighbour graph over the vectors, converts it to a k-NN graph and
    // runs the annembed gradient embedding on it. The neighbour count controls how much local
    // structure the embedding keeps: 15 gives a UMAP-style result, smaller values give a coarser
    // graph layout.
    let vectors: Vec<Vec<f32>> = data.iter()
        .map(|v| v.iter().map(|x| *x as f32).collect()).collect();
    let neighbours = neighbours.min(data.len() - 1);
    let hnsw: Hnsw<f32, DistL2> = Hnsw::new(16, data.len(), 16, 200, DistL2 {});
    let for_insertion: Vec<(&Vec<f32>, usize)> = vectors.iter().enumerate()
        .map(|(i, v)| (v, i)).collect();
    hnsw.parallel_insert(&for_insertion);

    let kgraph: KGraph<f32> = kgraph_from_hnsw_all(&hnsw, neighbours).unwrap_or_else(|e| {
        quit_with_error(&format!("failed to build the nearest-neighbour graph for embedding\n\
                                  {}", e));
    });
    let mut params = EmbedderParams::default();
    params.set_dim(2);
    let mut embedder = Embedder::new(&kgraph, params);
    embedder.embed().unwrap_or_else(|e| {
        quit_with_error(&format!("embedding failed\n{}", e));
    });
    let embedded = embedder.get_embedded_reindexed();
    embedded.rows().into_iter()
        .map(|row| [row[0] as f64, row[1] as f64]).collect()
}
