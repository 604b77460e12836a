use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use serde::Serialize;
use tracing::debug;

use superh_rs::{Architecture, BranchKind, BranchTarget};

use crate::model::{Image, is_mapped, read_opcode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind { Fallthrough, Branch, CondBranch, Call }

impl EdgeKind {
    pub fn tag(self) -> &'static str {
        match self { EdgeKind::Fallthrough => "ft", EdgeKind::Branch => "br", EdgeKind::CondBranch => "cbr", EdgeKind::Call => "call" }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge { pub from: u32, pub to: u32, pub kind: EdgeKind }

#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Decoded instruction addresses, delay slots included.
    pub visited: BTreeSet<u32>,
    pub edges: Vec<Edge>,
    /// Addresses of the last instruction of a block: a branch, or the slot of a delayed one.
    pub block_ends: HashSet<u32>,
    pub slots: HashSet<u32>,
    /// Addresses with at least one branch descriptor.
    pub branch_sites: HashSet<u32>,
    pub rets: HashSet<u32>,
}

/// Recursive descent from `entries` over the control-flow facts of each instruction.
pub fn analyze_entries(arch: &Architecture, img: &Image, entries: &[u32], max_instr: usize) -> Analysis {
    let mut a = Analysis::default();
    let mut queue: VecDeque<u32> = VecDeque::new();
    for &e in entries { if is_mapped(img, e) { queue.push_back(e); } }
    let mut steps = 0usize;

    let follow = |a: &mut Analysis, q: &mut VecDeque<u32>, from: u32, to: u32, kind: EdgeKind| {
        a.edges.push(Edge { from, to, kind });
        if is_mapped(img, to) { q.push_back(to); }
    };

    while let Some(pc) = queue.pop_front() {
        if steps >= max_instr { break; }
        if a.visited.contains(&pc) && !a.slots.contains(&pc) { continue; }
        let Some(bytes) = read_opcode(img, pc) else { continue; };
        let info = match arch.info(bytes, pc) {
            Ok(info) => info,
            Err(e) => { debug!(pc = format_args!("{pc:#010x}"), error = %e, "stopping at undecodable word"); continue; }
        };
        // a slot reached again as a branch target starts its own walk
        a.slots.remove(&pc);
        a.visited.insert(pc);
        steps += 1;

        let ft = pc.wrapping_add(info.length);
        if info.falls_through() {
            if is_mapped(img, ft) { follow(&mut a, &mut queue, pc, ft, EdgeKind::Fallthrough); }
            continue;
        }

        a.branch_sites.insert(pc);
        let delayed = info.has_delay_slot();
        let after = if delayed { ft.wrapping_add(2) } else { ft };
        if delayed {
            if let Some(slot) = read_opcode(img, ft) {
                if arch.info(slot, ft).is_ok() && !a.visited.contains(&ft) {
                    a.visited.insert(ft);
                    a.slots.insert(ft);
                }
            }
            a.block_ends.insert(ft);
        } else {
            a.block_ends.insert(pc);
        }

        for b in &info.branches {
            let target = b.target.address();
            match (b.kind, target) {
                (BranchKind::True, Some(t)) => follow(&mut a, &mut queue, pc, t, EdgeKind::CondBranch),
                (BranchKind::False, Some(t)) => follow(&mut a, &mut queue, pc, t, EdgeKind::Fallthrough),
                (BranchKind::Unconditional, Some(t)) => follow(&mut a, &mut queue, pc, t, EdgeKind::Branch),
                (BranchKind::Call, t) => {
                    if let Some(t) = t { follow(&mut a, &mut queue, pc, t, EdgeKind::Call); }
                    if is_mapped(img, after) { follow(&mut a, &mut queue, pc, after, EdgeKind::Fallthrough); }
                }
                (BranchKind::Return, _) => { a.rets.insert(pc); }
                (kind, _) => {
                    if let BranchTarget::Register(r) | BranchTarget::RegisterRelative { reg: r, .. } = b.target {
                        debug!(pc = format_args!("{pc:#010x}"), ?kind, reg = %r, "unresolved indirect transfer");
                    }
                }
            }
        }
    }
    a
}

#[derive(Debug, Clone, Serialize)]
pub struct Block { pub start: u32, pub end: u32 }

/// Linear sweep from each block start until a terminator, a gap or the next start.
/// Returns the blocks and a map from every covered address to its block start.
pub fn build_blocks(a: &Analysis, seeds: &[u32]) -> (Vec<Block>, HashMap<u32, u32>) {
    let targets = a.edges.iter()
        .filter(|e| e.kind != EdgeKind::Fallthrough || a.branch_sites.contains(&e.from))
        .map(|e| e.to);
    let mut starts: Vec<u32> = seeds.iter().copied().chain(targets).collect();
    starts.sort_unstable();
    starts.dedup();

    let mut blocks = Vec::new();
    let mut addr_to_block: HashMap<u32, u32> = HashMap::new();
    for &start in &starts {
        if !a.visited.contains(&start) || addr_to_block.contains_key(&start) { continue; }
        let mut cur = start;
        loop {
            let next = cur.wrapping_add(2);
            let should_end = a.block_ends.contains(&cur)
                || !a.visited.contains(&next)
                || starts.binary_search(&next).is_ok();
            addr_to_block.insert(cur, start);
            if should_end {
                blocks.push(Block { start, end: next });
                break;
            }
            cur = next;
        }
    }
    (blocks, addr_to_block)
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeOut { pub from: u32, pub to: u32, pub kind: String }

#[derive(Debug, Clone, Serialize)]
pub struct FunctionOut { pub entry: u32, pub blocks: Vec<u32> }

#[derive(Debug, Clone, Serialize)]
pub struct Report<Blk=Block> {
    pub entries: Vec<u32>,
    pub blocks: Vec<Blk>,
    pub edges: Vec<EdgeOut>,
    pub functions: Vec<FunctionOut>,
}

/// Edges rewritten to block starts; fall-through inside a block is dropped.
pub fn block_edges(a: &Analysis, addr_to_block: &HashMap<u32, u32>) -> Vec<EdgeOut> {
    a.edges.iter().filter_map(|e| {
        if addr_to_block.get(&e.to).is_some_and(|&b| b != e.to) { return None; }
        let from = *addr_to_block.get(&e.from).unwrap_or(&e.from);
        Some(EdgeOut { from, to: e.to, kind: e.kind.tag().to_string() })
    }).collect()
}

/// Each seed is a function root; collect the block starts reachable without following calls.
pub fn functions(seeds: &[u32], edges: &[EdgeOut]) -> Vec<FunctionOut> {
    let mut adj: HashMap<u32, Vec<u32>> = HashMap::new();
    for e in edges.iter().filter(|e| e.kind != EdgeKind::Call.tag()) { adj.entry(e.from).or_default().push(e.to); }
    seeds.iter().map(|&entry| {
        let mut seen: HashSet<u32> = HashSet::new();
        let mut q = VecDeque::from([entry]);
        while let Some(b) = q.pop_front() {
            if !seen.insert(b) { continue; }
            if let Some(nexts) = adj.get(&b) { q.extend(nexts.iter().copied()); }
        }
        let mut blocks: Vec<u32> = seen.into_iter().collect();
        blocks.sort_unstable();
        FunctionOut { entry, blocks }
    }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use superh_rs::IsaVariant;

    fn image(words: &[u16]) -> Image {
        Image::from_bytes(0, words.iter().flat_map(|w| w.to_be_bytes()).collect())
    }

    #[test]
    fn bra_keeps_delay_slot_in_block() {
        // 0: BRA 0x8 ; 2: NOP (slot) ; 4: NOP ; 6: NOP ; 8: RTS ; a: NOP (slot)
        let img = image(&[0xA002, 0x0009, 0x0009, 0x0009, 0x000B, 0x0009]);
        let arch = Architecture::with_variant(IsaVariant::Sh1);
        let a = analyze_entries(&arch, &img, &[0], 100);
        assert!(a.edges.iter().any(|e| e.kind == EdgeKind::Branch && e.from == 0 && e.to == 8));
        assert!(a.slots.contains(&2));
        assert!(!a.visited.contains(&4));
        assert!(a.rets.contains(&8));

        let (blocks, _) = build_blocks(&a, &[0]);
        let spans: Vec<(u32, u32)> = blocks.iter().map(|b| (b.start, b.end)).collect();
        assert_eq!(spans, vec![(0, 4), (8, 0xC)]);
    }

    #[test]
    fn conditional_branch_has_both_edges() {
        // 0: BT 0x6 ; 2: NOP ; 4: NOP ; 6: RTS ; 8: NOP
        let img = image(&[0x8901, 0x0009, 0x0009, 0x000B, 0x0009]);
        let arch = Architecture::default();
        let a = analyze_entries(&arch, &img, &[0], 100);
        assert!(a.edges.contains(&Edge { from: 0, to: 6, kind: EdgeKind::CondBranch }));
        assert!(a.edges.contains(&Edge { from: 0, to: 2, kind: EdgeKind::Fallthrough }));
        let (blocks, map) = build_blocks(&a, &[0]);
        assert_eq!(blocks.len(), 3);
        assert_eq!(map.get(&4), Some(&2));
    }

    #[test]
    fn call_falls_through_after_slot() {
        // 0: BSR 0x8 ; 2: NOP ; 4: RTS ; 6: NOP ; 8: RTS ; a: NOP
        let img = image(&[0xB002, 0x0009, 0x000B, 0x0009, 0x000B, 0x0009]);
        let arch = Architecture::default();
        let a = analyze_entries(&arch, &img, &[0], 100);
        assert!(a.edges.contains(&Edge { from: 0, to: 8, kind: EdgeKind::Call }));
        assert!(a.edges.contains(&Edge { from: 0, to: 4, kind: EdgeKind::Fallthrough }));
        let (_, map) = build_blocks(&a, &[0]);
        let fns = functions(&[0], &block_edges(&a, &map));
        assert_eq!(fns[0].blocks, vec![0, 4]);
    }
}
