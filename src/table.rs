use std::ops::Index;

use crate::utils::MyHash;

/// Hash-consing table: every distinct value is stored exactly once.
///
/// Values are addressed by a `u32` index. Index 0 is a sentinel that never holds
/// a real value, so `0` doubles as the end-of-chain marker in the bucket lists.
/// The bucket array doubles whenever the average chain length exceeds two.
pub struct Table<T> {
    data: Vec<T>,
    next: Vec<u32>,
    buckets: Vec<u32>,
    bitmask: u64,
}

impl<T> Table<T>
where
    T: Default,
{
    /// Create a new table with `2^bits` buckets.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bucket bits should be in the range 0..=31");

        let buckets_size = 1usize << bits;
        Self {
            data: vec![T::default()],
            next: vec![0],
            buckets: vec![0; buckets_size],
            bitmask: (buckets_size - 1) as u64,
        }
    }
}

impl<T> Table<T> {
    /// Number of stored values (the sentinel excluded).
    pub fn size(&self) -> usize {
        self.data.len() - 1
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    pub fn value(&self, index: u32) -> &T {
        assert_ne!(index, 0, "Index is 0");
        &self.data[index as usize]
    }
}

impl<T> Table<T>
where
    T: MyHash + Eq,
{
    fn bucket_index(&self, value: &T) -> usize {
        (value.hash() & self.bitmask) as usize
    }

    /// Return the index of `value`, inserting it first if it is new.
    pub fn put(&mut self, value: T) -> u32 {
        let bucket = self.bucket_index(&value);

        let mut index = self.buckets[bucket];
        while index != 0 {
            if self.data[index as usize] == value {
                return index;
            }
            index = self.next[index as usize];
        }

        // Ref keeps the node id in 31 bits.
        assert!(self.data.len() < (1 << 31), "Storage is full");
        let index = self.data.len() as u32;
        self.data.push(value);
        self.next.push(self.buckets[bucket]);
        self.buckets[bucket] = index;

        if self.data.len() > 2 * self.buckets.len() {
            self.grow();
        }

        index
    }

    fn grow(&mut self) {
        let size = self.buckets.len() * 2;
        self.buckets = vec![0; size];
        self.bitmask = (size - 1) as u64;

        for index in 1..self.data.len() {
            let bucket = self.bucket_index(&self.data[index]);
            self.next[index] = self.buckets[bucket];
            self.buckets[bucket] = index as u32;
        }
    }
}

impl<T> Index<u32> for Table<T> {
    type Output = T;

    fn index(&self, index: u32) -> &Self::Output {
        self.value(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
    struct Item(u64);

    impl MyHash for Item {
        fn hash(&self) -> u64 {
            // Deliberately poor, to exercise chaining.
            self.0 % 3
        }
    }

    #[test]
    fn test_put_dedup() {
        let mut table = Table::new(2);
        let a = table.put(Item(5));
        let b = table.put(Item(6));
        let c = table.put(Item(5));
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(a, c);
        assert_eq!(table.size(), 2);
        assert_eq!(table[a], Item(5));
    }

    #[test]
    fn test_grow_keeps_indices() {
        let mut table = Table::new(1);
        let indices: Vec<u32> = (0..100).map(|i| table.put(Item(i))).collect();
        assert!(table.num_buckets() > 2);
        for (i, &index) in indices.iter().enumerate() {
            assert_eq!(table.put(Item(i as u64)), index);
            assert_eq!(table[index], Item(i as u64));
        }
        assert_eq!(table.size(), 100);
    }
}
