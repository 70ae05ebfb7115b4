use res_util::{UniqueCPtr, utf16_string_from_device};

#[derive(Debug)]
struct TableHeader {
    package_count: u32,
    string_pool_offset: u32,
}

fn main() {
    // 1. Allocate a header with malloc
    // 1. 使用 malloc 分配头部
    let mut header = match UniqueCPtr::new(TableHeader {
        package_count: 1,
        string_pool_offset: 12,
    }) {
        Some(header) => header,
        None => {
            eprintln!("malloc failed");
            return;
        }
    };
    println!("Header at {:p}: {:?}", header, *header);
    println!("String pool at offset {}", header.string_pool_offset);

    // 2. Mutate through the handle
    // 2. 通过 handle 修改
    header.package_count += 1;
    println!("Updated: {:?}", header.as_ref());

    // 3. Move ownership out; the source becomes empty
    // 3. 转移所有权；源 handle 变为空
    let moved = header.take();
    println!("\nAfter take: source null = {}, moved = {:?}", header.is_null(), moved);

    // 4. Hand the pointer to code that frees it itself
    // 4. 将指针交给自行释放的代码
    let mut moved = moved;
    let raw = moved.release();
    println!("Released {:p}, handle null = {}", raw, moved.is_null());
    drop(unsafe { UniqueCPtr::<TableHeader>::from_raw(raw) });

    // 5. Decode a string from a table buffer
    // 5. 从资源表缓冲区解码字符串
    let units: Vec<u16> = "app_name\0".encode_utf16().map(u16::to_le).collect();
    println!("\nString: {:?}", utf16_string_from_device(&units, units.len()));
}
