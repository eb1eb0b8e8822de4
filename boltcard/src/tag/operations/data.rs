use crate::constants::MAX_FILE_CHUNK;
use crate::file::CapabilitiesContainer;
use crate::protocol::NativeCommand;
use crate::session::{SecureChannel, Session};
use crate::transport::Transport;
use crate::types::{CommunicationMode, FileSpecifier};
use crate::{Error, Result};

fn check_window(file: FileSpecifier, offset: usize, length: usize) -> Result<()> {
    let end = offset.saturating_add(length);
    if end > file.max_size() {
        return Err(Error::FileTooLarge {
            file,
            max: file.max_size(),
            actual: end,
        });
    }
    Ok(())
}

/// ReadData, one native command per 128-byte window. A `length` of zero
/// asks the tag for everything from `offset` to the end of the file.
pub async fn read_file_data<T: Transport + ?Sized>(
    transport: &mut T,
    session: &mut Session,
    file: FileSpecifier,
    offset: usize,
    length: usize,
    mode: CommunicationMode,
) -> Result<Vec<u8>> {
    check_window(file, offset, length)?;
    let mut channel = SecureChannel::new(transport, session);

    if length == 0 {
        return channel
            .send(&NativeCommand::ReadData {
                file,
                offset: offset as u32,
                length: 0,
                mode,
            })
            .await;
    }

    let mut out = Vec::with_capacity(length);
    let end = offset + length;
    let mut position = offset;
    while position < end {
        let take = (end - position).min(MAX_FILE_CHUNK);
        let mut chunk = channel
            .send(&NativeCommand::ReadData {
                file,
                offset: position as u32,
                length: take as u32,
                mode,
            })
            .await?;
        if chunk.len() < take {
            return Err(Error::InvalidLength {
                expected: take,
                actual: chunk.len(),
            });
        }
        chunk.truncate(take);
        out.extend_from_slice(&chunk);
        position += take;
    }
    log::debug!("read {} bytes from {} at {}", out.len(), file, offset);
    Ok(out)
}

/// WriteData, split into chunks of at most 128 bytes.
pub async fn write_file_data<T: Transport + ?Sized>(
    transport: &mut T,
    session: &mut Session,
    file: FileSpecifier,
    offset: usize,
    data: &[u8],
    mode: CommunicationMode,
) -> Result<()> {
    check_window(file, offset, data.len())?;
    let mut channel = SecureChannel::new(transport, session);
    for (i, chunk) in data.chunks(MAX_FILE_CHUNK).enumerate() {
        channel
            .send(&NativeCommand::WriteData {
                file,
                offset: (offset + i * MAX_FILE_CHUNK) as u32,
                data: chunk.to_vec(),
                mode,
            })
            .await?;
    }
    log::debug!("wrote {} bytes to {} at {}", data.len(), file, offset);
    Ok(())
}

/// Read file 1 and decode the container, ignoring bytes past its CCLEN.
pub async fn read_capabilities_container<T: Transport + ?Sized>(
    transport: &mut T,
    session: &mut Session,
    mode: CommunicationMode,
) -> Result<CapabilitiesContainer> {
    let file = FileSpecifier::Cc;
    let image = read_file_data(transport, session, file, 0, file.max_size(), mode).await?;
    CapabilitiesContainer::decode_file(&image)
}
