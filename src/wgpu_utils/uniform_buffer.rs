// src/wgpu_utils/uniform_buffer.rs - Single and per-draw uniform buffers
use std::marker::PhantomData;

fn short_type_name<Content>() -> &'static str {
    let type_name = std::any::type_name::<Content>();
    let pos = type_name.rfind(':').unwrap_or(0);
    if pos > 0 {
        &type_name[(pos + 1)..]
    } else {
        type_name
    }
}

/// Rounds `size` up to the next multiple of `alignment`
pub fn align_to(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// Typed wrapper around a single uniform record
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", short_type_name::<Content>())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: Vec::new(),
        }
    }

    /// Update buffer content (skips the write when nothing changed)
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) {
        let new_content = bytemuck::bytes_of(&content);
        if self.previous_content == new_content {
            return;
        }
        queue.write_buffer(&self.buffer, 0, new_content);
        self.previous_content = new_content.to_vec();
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}

/// Array of uniform records addressed with dynamic offsets
///
/// Each record occupies `stride` bytes, the record size rounded up to the
/// device's `min_uniform_buffer_offset_alignment`. The buffer grows by
/// doubling when a frame needs more records than it holds; callers must
/// rebuild any bind group referencing it when [`ensure_capacity`] returns
/// `true`.
///
/// [`ensure_capacity`]: DynamicUniformBuffer::ensure_capacity
pub struct DynamicUniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    stride: u64,
    capacity: usize,
    staging: Vec<u8>,
}

impl<Content: bytemuck::Pod> DynamicUniformBuffer<Content> {
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = align_to(std::mem::size_of::<Content>() as u64, alignment);
        let capacity = capacity.max(1);

        Self {
            buffer: Self::create_buffer(device, stride, capacity),
            content_type: PhantomData,
            stride,
            capacity,
            staging: Vec::new(),
        }
    }

    fn create_buffer(device: &wgpu::Device, stride: u64, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!(
                "DynamicUniformBuffer<{}>",
                short_type_name::<Content>()
            )),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Grows the buffer to hold at least `count` records
    ///
    /// Returns `true` if the underlying buffer was replaced.
    pub fn ensure_capacity(&mut self, device: &wgpu::Device, count: usize) -> bool {
        if count <= self.capacity {
            return false;
        }
        let mut capacity = self.capacity;
        while capacity < count {
            capacity *= 2;
        }
        log::debug!(
            "Growing {} from {} to {} records",
            short_type_name::<Content>(),
            self.capacity,
            capacity
        );
        self.buffer = Self::create_buffer(device, self.stride, capacity);
        self.capacity = capacity;
        true
    }

    /// Writes `records` starting at offset zero
    pub fn write(&mut self, queue: &wgpu::Queue, records: &[Content]) {
        if records.is_empty() {
            return;
        }
        let record_size = std::mem::size_of::<Content>();
        self.staging.clear();
        self.staging.resize(self.stride as usize * records.len(), 0);
        for (i, record) in records.iter().enumerate() {
            let start = i * self.stride as usize;
            self.staging[start..start + record_size].copy_from_slice(bytemuck::bytes_of(record));
        }
        queue.write_buffer(&self.buffer, 0, &self.staging);
    }

    /// Dynamic offset of record `index`
    pub fn offset(&self, index: usize) -> wgpu::DynamicOffset {
        (index as u64 * self.stride) as wgpu::DynamicOffset
    }

    /// Binding covering a single record, as dynamic offsets require
    pub fn binding_resource(&self) -> wgpu::BindingResource {
        wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: &self.buffer,
            offset: 0,
            size: wgpu::BufferSize::new(std::mem::size_of::<Content>() as u64),
        })
    }
}
