//! Walkthrough of the three structures
//!
//! ```bash
//! cargo run --example walkthrough
//! ```

use classic_collections::binary::BinaryMinHeap;
use classic_collections::fibonacci::FibonacciHeap;
use classic_collections::hash_table::ChainedHashTable;
use classic_collections::HeapError;

fn main() -> Result<(), HeapError> {
    println!("--- Binary min-heap ---");
    let mut min_heap = BinaryMinHeap::new();
    for value in [5, 1, 9, 3] {
        min_heap.push(value, ());
    }
    println!("Min element: {}", min_heap.try_peek()?.0);
    while let Some((value, ())) = min_heap.pop() {
        println!("Popped: {}", value);
    }

    println!("\n--- Hash table ---");
    let mut table = ChainedHashTable::new();
    table.insert("apple", 1);
    table.insert("banana", 2);
    table.insert("cherry", 3);
    println!("Value of banana: {:?}", table.get("banana"));
    println!("Size of hash table: {}", table.len());
    println!("Contains 'apple': {}", table.contains_key("apple"));
    table.remove("banana");
    println!("Value of banana after removal: {:?}", table.get("banana"));
    println!("Size of hash table after removal: {}", table.len());

    println!("\n--- Fibonacci heap ---");
    let mut fib_heap = FibonacciHeap::new();
    for (key, name) in [(5, "A"), (1, "B"), (9, "C"), (3, "D")] {
        fib_heap.insert(key, name);
    }
    println!(
        "Min element: {} : {}",
        fib_heap.find_min_key()?,
        fib_heap.find_min_item()?
    );
    while let Some((_, name)) = fib_heap.extract_min() {
        println!("Extracted: {}", name);
    }

    println!("\n--- Fibonacci heap with decrease_key/delete ---");
    let mut fib_heap = FibonacciHeap::new();
    let _a = fib_heap.insert(5, "A");
    let b = fib_heap.insert(1, "B");
    let c = fib_heap.insert(9, "C");
    let _d = fib_heap.insert(3, "D");

    fib_heap.decrease_key(&c, 2)?;
    fib_heap.delete(&b)?;
    println!(
        "Min element after decrease_key and delete: {} : {}",
        fib_heap.find_min_key()?,
        fib_heap.find_min_item()?
    );
    while let Some((_, name)) = fib_heap.extract_min() {
        println!("Extracted: {}", name);
    }

    Ok(())
}
