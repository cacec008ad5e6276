use riffwalk::{Chunk, Group, Tag, Underflow};

fn indent(depth: usize) -> String {
    "||".repeat(depth)
}

// Up to `max` bytes as space separated hex, `...` when there is more
pub fn preview(data: &[u8], max: usize) -> String {
    let shown = &data[..data.len().min(max)];
    let mut out = shown.iter().map(|b| hex::encode([*b])).collect::<Vec<_>>().join(" ");

    if data.len() > shown.len() {
        out.push_str("...");
    }
    out
}

pub fn group_start(depth: usize, group: &Group) -> String {
    format!(
        "{} p--{}.START[{}]: TYPE <{}> SIZE({}){}",
        indent(depth),
        group.id,
        depth,
        group.typ,
        group.size,
        if group.opaque { " SKIPPED" } else { "" }
    )
}

pub fn group_end(depth: usize, id: &Tag) -> String {
    format!("{} b--{}.END[{}].", indent(depth), id, depth)
}

pub fn chunk(depth: usize, chunk: &Chunk, max: usize) -> String {
    let pad = indent(depth + 1);

    format!(
        "{pad}....CHUNK: ID <{}> SIZE({}) OFFSET(0x{:08x})\n{pad}....DATA : [{}]",
        chunk.id,
        chunk.size,
        chunk.offset,
        preview(chunk.data, max),
    )
}

pub fn underflow(underflow: &Underflow) -> String {
    format!(
        "!!! LIST[{}] UNDERFLOW ERROR !!! AT 0x{:08x} LEFT {} LEN {}",
        underflow.level, underflow.offset, underflow.remaining, underflow.requested
    )
}
