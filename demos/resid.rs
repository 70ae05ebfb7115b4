use res_util::{ResId, fix_package_id, is_internal_resid, is_valid_resid};

fn main() {
    // 1. Build an id from its fields
    // 1. 由字段构建 id
    let id = ResId::from_parts(0x7f, 0x02, 0x0001);
    println!("{} -> package {:#04x}, type {:#04x}, entry {:#06x}",
        id, id.package_id(), id.type_id(), id.entry_id());

    // 2. Rewrite the package id when a shared library is loaded at a new slot
    // 2. 共享库被加载到新位置时重写 package id
    let shared = 0x0002_0001;
    let fixed = fix_package_id(shared, 0x03);
    println!("\nShared lib id {:#010x} fixed to {:#010x}", shared, fixed);

    // 3. Classify a few ids
    // 3. 对几个 id 分类
    println!("\nClassification:");
    for raw in [0x7f02_0001u32, 0x7f00_0001, 0x0002_0001, 0x0000_0000] {
        println!("{:#010x}: valid={} internal={}",
            raw, is_valid_resid(raw), is_internal_resid(raw));
    }

    // 4. Parse ids from text
    // 4. 从文本解析 id
    println!("\nParsing:");
    for text in ["0x7f020001", "7F020001", "0xnothex", ""] {
        match text.parse::<ResId>() {
            Ok(id) => println!("{:?} -> {:?}", text, id),
            Err(e) => println!("{:?} -> error: {}", text, e),
        }
    }
}
